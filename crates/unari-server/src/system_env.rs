//! Production Environment implementation using the system clock.
//!
//! `SystemEnv` reads real wall-clock time, so "today" advances naturally
//! across midnight in the configured reference timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use unari_core::Environment;

/// Production environment using system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemEnv {
    tz: Tz,
}

impl SystemEnv {
    /// Create a system environment evaluating dates in `tz`.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Default for SystemEnv {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Helsinki)
    }
}

impl Environment for SystemEnv {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn reference_tz(&self) -> Tz {
        self.tz
    }
}
