//! Terminal UI for the Unari menu terminal
//!
//! A thin shell over [`unari_app::Driver`] that renders [`unari_app::App`]
//! with ratatui and decodes client bytes into input events. All session
//! orchestration lives in the generic [`unari_app::Runtime`].
//!
//! This crate knows nothing about SSH: the transport hands it a
//! [`SessionIo`] of byte channels.

#![forbid(unsafe_code)]

pub mod input;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use input::InputDecoder;
pub use terminal::{
    FrameWriter, MAX_DIMENSION, SessionInput, SessionIo, TerminalDriver, TerminalError, clamp_dimension,
};
pub use theme::{ColorSupport, Theme};
pub use unari_app::{App, AppEvent, Driver, RegionMap, Runtime};
