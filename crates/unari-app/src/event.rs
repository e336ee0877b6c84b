//! Application input events.
//!
//! This module defines [`AppEvent`], the closed set of inputs that drive the
//! [`crate::App`] state machine, and the key bindings that produce them.
//!
//! Events originate from two distinct sources:
//! - User interactions (keys, pointer, resize).
//! - The session's menu fetch completing.

use chrono::NaiveDate;
use unari_core::{FetchError, MenuRecord};

use crate::{KeyInput, MouseInput};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Select the previous campus, wrapping to the last.
    NavigatePrev,

    /// Select the next campus, wrapping to the first.
    NavigateNext,

    /// Show the next calendar day.
    DateForward,

    /// Show the previous calendar day.
    DateBackward,

    /// Show the current day.
    JumpToday {
        /// "Now" in the reference timezone at the moment of the event.
        today: NaiveDate,
    },

    /// Pointer event, hit-tested against the last rendered layout.
    Mouse(MouseInput),

    /// Menu fetch finished, successfully or not.
    DataLoaded(Result<Vec<MenuRecord>, FetchError>),

    /// End the session.
    Quit,
}

impl AppEvent {
    /// Map a key to its bound event. `None` for unbound keys.
    ///
    /// `today` is only evaluated for the jump-to-today binding.
    pub fn from_key(key: KeyInput, today: impl FnOnce() -> NaiveDate) -> Option<Self> {
        match key {
            KeyInput::Char('q') | KeyInput::Ctrl('c') => Some(Self::Quit),
            KeyInput::Up | KeyInput::Char('k') => Some(Self::NavigatePrev),
            KeyInput::Down | KeyInput::Char('j') => Some(Self::NavigateNext),
            KeyInput::Right | KeyInput::Char('l') => Some(Self::DateForward),
            KeyInput::Left | KeyInput::Char('h') => Some(Self::DateBackward),
            KeyInput::Char('t' | 'T') => Some(Self::JumpToday { today: today() }),
            _ => None,
        }
    }
}
