//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the session loop from a specific terminal
//! transport. Each frontend implements the trait to provide its own I/O,
//! while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, RegionMap, TerminalInput};

/// Abstracts terminal I/O for one session.
///
/// # Implementations
///
/// - **SSH**: decodes channel bytes, renders frames with ratatui
/// - **Tests**: in-memory channels and recorded renders
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Prepare the terminal (alternate screen, pointer reporting).
    ///
    /// # Errors
    ///
    /// Returns an error if the output is already closed.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Wait for the next input.
    ///
    /// Returns `None` once the input is closed: the peer disconnected or the
    /// server is shutting down. Must be cancel-safe, as the runtime races it
    /// against the menu fetch.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<TerminalInput>, Self::Error>> + Send;

    /// Render a full frame of the application state.
    ///
    /// Returns the hit-test regions of the rendered frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be written.
    fn render(&mut self, app: &App) -> Result<RegionMap, Self::Error>;

    /// Restore the terminal and release the output.
    fn stop(&mut self);
}
