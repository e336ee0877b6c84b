//! Application side-effects.
//!
//! [`AppAction`]s are instructions produced by the [`crate::App`] state
//! machine for the runtime to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Close the session.
    Quit,
}
