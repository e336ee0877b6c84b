//! Environment abstraction for deterministic testing.
//!
//! Decouples session logic from the wall clock. Production uses the system
//! clock; tests pin "now" to a fixed instant so date navigation is
//! reproducible.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::ConfigError;

/// Abstract environment providing the current time and the reference
/// timezone in which "today" is evaluated.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Timezone whose calendar defines "today".
    fn reference_tz(&self) -> Tz;

    /// Calendar day of [`Environment::now`] in the reference timezone.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.reference_tz()).date_naive()
    }
}

/// Parse an IANA timezone name such as `Europe/Helsinki`.
pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>().map_err(|_| ConfigError::Timezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[derive(Clone)]
    struct PinnedEnv(DateTime<Utc>);

    impl Environment for PinnedEnv {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }

        fn reference_tz(&self) -> Tz {
            chrono_tz::Europe::Helsinki
        }
    }

    #[test]
    fn today_uses_reference_timezone() {
        // 22:30 UTC on 1 June is already 2 June in Helsinki (UTC+3 in summer).
        let env = PinnedEnv(Utc.with_ymd_and_hms(2025, 6, 1, 22, 30, 0).unwrap());
        assert_eq!(env.today(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    }

    #[test]
    fn parse_timezone_rejects_unknown_names() {
        assert!(parse_timezone("Europe/Helsinki").is_ok());
        assert!(matches!(parse_timezone("Mars/Olympus"), Err(ConfigError::Timezone(_))));
    }
}
