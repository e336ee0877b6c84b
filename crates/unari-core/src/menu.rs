//! Menu records and the per-campus lookup index.
//!
//! [`MenuRecord`]s arrive from the upstream source in source order. The
//! [`MenuIndex`] groups them by campus once, then answers "which restaurants
//! at campus X serve something on day Y" without further allocation of the
//! records themselves.

use std::{collections::HashMap, fmt};

use chrono::{Datelike, NaiveDate};

use crate::{CampusDirectory, FetchError, MenuError};

/// Day and month of a menu entry. Upstream dates carry no year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuDay {
    /// Day of month, 1-31.
    pub day: u8,
    /// Month, 1-12.
    pub month: u8,
}

impl MenuDay {
    /// Create a day, validating the ranges. `None` if out of range.
    pub fn new(day: u8, month: u8) -> Option<Self> {
        ((1..=31).contains(&day) && (1..=12).contains(&month)).then_some(Self { day, month })
    }

    /// Parse an upstream date label such as `"Ma 02.06."` or `"Mon 02.06."`.
    ///
    /// Only the last whitespace-separated token is significant and it must
    /// start with `DD.MM`. Anything after the month (a trailing dot or year)
    /// is ignored.
    pub fn parse(label: &str) -> Option<Self> {
        let token = label.split_whitespace().last()?;
        let mut parts = token.split('.');
        let day = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        Self::new(day, month)
    }
}

impl From<NaiveDate> for MenuDay {
    fn from(date: NaiveDate) -> Self {
        Self { day: date.day() as u8, month: date.month() as u8 }
    }
}

impl fmt::Display for MenuDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.", self.day, self.month)
    }
}

/// One dated menu of a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Day the menu is served.
    pub day: MenuDay,
    /// Meal names in upstream order.
    pub items: Vec<String>,
}

/// Fetched data for one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRecord {
    /// Restaurant title, matched exactly against campus restaurant lists.
    pub title: String,
    /// Dated menus in upstream order.
    pub entries: Vec<MenuEntry>,
}

impl MenuRecord {
    /// Create a record with the given title and entries.
    pub fn new(title: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        Self { title: title.into(), entries }
    }
}

/// One restaurant header and its meals, as shown for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSection<'a> {
    /// Restaurant title.
    pub restaurant: &'a str,
    /// Meal names.
    pub items: &'a [String],
}

/// Read-only lookup from campus name to the records of its restaurants.
///
/// Built in one step and never mutated afterwards: a refresh builds a new
/// index and replaces the old one by value, so a reader never sees a
/// partially populated index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuIndex {
    by_campus: HashMap<String, Vec<MenuRecord>>,
}

impl MenuIndex {
    /// An index with no records. Every lookup returns no match.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from the outcome of a fetch.
    ///
    /// A failed fetch yields [`MenuError::DataUnavailable`]; callers recover
    /// by falling back to [`MenuIndex::empty`].
    pub fn build(
        campuses: &CampusDirectory,
        fetched: Result<Vec<MenuRecord>, FetchError>,
    ) -> Result<Self, MenuError> {
        Ok(Self::from_records(campuses, fetched?))
    }

    /// Group records by campus. Records whose title belongs to no campus are
    /// dropped; source order is preserved within each campus.
    pub fn from_records(campuses: &CampusDirectory, records: Vec<MenuRecord>) -> Self {
        let mut by_campus: HashMap<String, Vec<MenuRecord>> = HashMap::new();

        for record in records {
            let owners: Vec<&str> = campuses
                .campuses()
                .iter()
                .filter(|c| c.contains(&record.title))
                .map(|c| c.name.as_str())
                .collect();

            if owners.is_empty() {
                tracing::trace!(title = %record.title, "record matches no campus");
                continue;
            }

            for owner in owners {
                by_campus.entry(owner.to_string()).or_default().push(record.clone());
            }
        }

        Self { by_campus }
    }

    /// Restaurants at `campus` with a menu for `date` (day and month only).
    ///
    /// Every matching entry contributes its own section, in source order, so
    /// a restaurant with two entries for the same day appears twice.
    pub fn lookup(&self, campus: &str, date: NaiveDate) -> Vec<MenuSection<'_>> {
        let day = MenuDay::from(date);

        self.by_campus
            .get(campus)
            .into_iter()
            .flatten()
            .flat_map(|record| {
                record.entries.iter().filter(move |entry| entry.day == day).map(move |entry| {
                    MenuSection { restaurant: &record.title, items: &entry.items }
                })
            })
            .collect()
    }

    /// Number of records held for `campus`.
    pub fn record_count(&self, campus: &str) -> usize {
        self.by_campus.get(campus).map_or(0, Vec::len)
    }

    /// `true` if no campus has any record.
    pub fn is_empty(&self) -> bool {
        self.by_campus.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Campus;

    fn kumpula() -> CampusDirectory {
        CampusDirectory::new(
            vec![Campus::new("Keskusta", &["Kaivopiha"]), Campus::new("Kumpula", &["Physicum"])],
            "Kumpula",
        )
        .unwrap()
    }

    fn entry(label: &str, items: &[&str]) -> MenuEntry {
        MenuEntry {
            day: MenuDay::parse(label).unwrap(),
            items: items.iter().map(|i| (*i).to_string()).collect(),
        }
    }

    fn date(day: u32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn parse_takes_last_token() {
        assert_eq!(MenuDay::parse("Mon 02.06."), MenuDay::new(2, 6));
        assert_eq!(MenuDay::parse("Ma 2.6."), MenuDay::new(2, 6));
        assert_eq!(MenuDay::parse("02.06.2025"), MenuDay::new(2, 6));
        assert_eq!(MenuDay::parse("Mon"), None);
        assert_eq!(MenuDay::parse("Mon 32.01."), None);
        assert_eq!(MenuDay::parse(""), None);
    }

    #[test]
    fn lookup_matches_day_and_month() {
        let records = vec![MenuRecord::new("Physicum", vec![entry("Mon 02.06.", &["Soup"])])];
        let index = MenuIndex::from_records(&kumpula(), records);

        let hits = index.lookup("Kumpula", date(2, 6));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].restaurant, "Physicum");
        assert_eq!(hits[0].items, ["Soup".to_string()]);

        assert!(index.lookup("Kumpula", date(3, 6)).is_empty());
    }

    #[test]
    fn lookup_ignores_year() {
        let records = vec![MenuRecord::new("Physicum", vec![entry("Mon 02.06.", &["Soup"])])];
        let index = MenuIndex::from_records(&kumpula(), records);

        let other_year = NaiveDate::from_ymd_opt(2031, 6, 2).unwrap();
        assert_eq!(index.lookup("Kumpula", other_year).len(), 1);
    }

    #[test]
    fn records_only_join_their_campus() {
        let records = vec![
            MenuRecord::new("Physicum", vec![entry("02.06.", &["Soup"])]),
            MenuRecord::new("Kaivopiha", vec![entry("02.06.", &["Pasta"])]),
            MenuRecord::new("Elsewhere", vec![entry("02.06.", &["Fish"])]),
        ];
        let index = MenuIndex::from_records(&kumpula(), records);

        assert_eq!(index.record_count("Kumpula"), 1);
        assert_eq!(index.record_count("Keskusta"), 1);
        assert!(index.lookup("Nowhere", date(2, 6)).is_empty());
    }

    #[test]
    fn duplicate_entries_keep_separate_headers() {
        let records = vec![MenuRecord::new("Physicum", vec![
            entry("Mon 02.06.", &["Soup"]),
            entry("Mon 02.06.", &["Salad", "Bread"]),
        ])];
        let index = MenuIndex::from_records(&kumpula(), records);

        let hits = index.lookup("Kumpula", date(2, 6));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].items.len(), 1);
        assert_eq!(hits[1].restaurant, "Physicum");
        assert_eq!(hits[1].items.len(), 2);
    }

    #[test]
    fn failed_fetch_is_data_unavailable() {
        let err = MenuIndex::build(&kumpula(), Err(FetchError::Status(500))).unwrap_err();
        assert_eq!(err, MenuError::DataUnavailable(FetchError::Status(500)));
        assert!(MenuIndex::empty().lookup("Kumpula", date(2, 6)).is_empty());
    }
}
