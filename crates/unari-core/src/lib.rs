//! Core data model for the Unari menu terminal.
//!
//! Everything here is free of I/O: the campus directory, fetched menu records,
//! the read-only [`MenuIndex`], and the contracts ([`Environment`],
//! [`MenuSource`]) the session layer uses to reach the outside world.

#![forbid(unsafe_code)]

mod campus;
pub mod env;
mod error;
mod menu;
mod source;

pub use campus::{Campus, CampusDirectory};
pub use env::Environment;
pub use error::{ConfigError, FetchError, MenuError};
pub use menu::{MenuDay, MenuEntry, MenuIndex, MenuRecord, MenuSection};
pub use source::MenuSource;
