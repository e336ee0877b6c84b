//! Application layer for the Unari menu terminal
//!
//! Pure state machine and generic session loop, enabling deterministic tests
//! with the same code that serves SSH sessions in production.
//!
//! # Components
//!
//! - [`App`]: view state machine (campus, date, geometry, loading)
//! - [`AppEvent`]: closed set of inputs, with key bindings
//! - [`RegionMap`]: hit-test regions of the last render
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic per-connection loop using Driver

#![forbid(unsafe_code)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod region;
mod runtime;

pub use action::AppAction;
pub use app::{App, SessionPhase};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::{KeyInput, MouseButton, MouseInput, MouseKind, TerminalInput};
pub use region::{Region, RegionMap};
pub use runtime::Runtime;
