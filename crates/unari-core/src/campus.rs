//! Campus directory.
//!
//! A campus is a named location grouping a fixed set of restaurants. The
//! directory is configuration: built once at startup and shared read-only by
//! every session.

use std::{collections::HashSet, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// A named location and the restaurants that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Campus {
    /// Display name, also the region name used for hit-testing.
    pub name: String,
    /// Restaurant titles matched exactly against upstream records.
    pub restaurants: Vec<String>,
}

impl Campus {
    /// Create a campus from a name and its restaurant titles.
    pub fn new(name: impl Into<String>, restaurants: &[&str]) -> Self {
        Self {
            name: name.into(),
            restaurants: restaurants.iter().map(|r| (*r).to_string()).collect(),
        }
    }

    /// Whether `title` is one of this campus's restaurants (case-sensitive).
    pub fn contains(&self, title: &str) -> bool {
        self.restaurants.iter().any(|r| r == title)
    }
}

/// On-disk representation of a campus directory.
#[derive(Debug, Deserialize)]
struct CampusFile {
    default: String,
    campuses: Vec<Campus>,
}

/// Ordered list of campuses plus the campus selected when a session starts.
///
/// # Invariants
///
/// - At least one campus.
/// - Campus names are unique.
/// - `default_index < len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusDirectory {
    campuses: Vec<Campus>,
    default_index: usize,
}

impl CampusDirectory {
    /// Build a directory, validating its invariants.
    pub fn new(campuses: Vec<Campus>, default_campus: &str) -> Result<Self, ConfigError> {
        if campuses.is_empty() {
            return Err(ConfigError::Invalid("at least one campus is required".into()));
        }

        let mut seen = HashSet::new();
        for campus in &campuses {
            if !seen.insert(campus.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate campus '{}'", campus.name)));
            }
        }

        let default_index =
            campuses.iter().position(|c| c.name == default_campus).ok_or_else(|| {
                ConfigError::Invalid(format!("default campus '{default_campus}' is not listed"))
            })?;

        Ok(Self { campuses, default_index })
    }

    /// Parse a directory from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: CampusFile = serde_json::from_str(json)?;
        Self::new(file.campuses, &file.default)
    }

    /// Load a directory from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// University of Helsinki campuses and their Unicafe restaurants.
    pub fn helsinki() -> Self {
        let campuses = vec![
            Campus::new("Keskusta", &[
                "Myöhä Café & Bar",
                "Kaivopiha",
                "Kaisa-talo",
                "Soc&Kom",
                "Rotunda",
                "Porthania Opettajien ravintola",
                "Porthania",
                "Topelias",
                "Olivia",
                "Metsätalo",
            ]),
            Campus::new("Kumpula", &[
                "Physicum",
                "Exactum",
                "Chemicum",
                "Chemicum Opettajien ravintola",
            ]),
            Campus::new("Meilahti", &["Terkko", "Meilahti"]),
            Campus::new("Töölö", &["Serpens"]),
            Campus::new("Viikki", &[
                "Tähkä",
                "Biokeskus 2",
                "Infokeskus alakerta",
                "Viikuna",
                "Infokeskus",
                "Biokeskus",
            ]),
        ];
        Self { campuses, default_index: 1 }
    }

    /// All campuses in display order.
    pub fn campuses(&self) -> &[Campus] {
        &self.campuses
    }

    /// Campus at `index`. `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Campus> {
        self.campuses.get(index)
    }

    /// Campus with the given name.
    pub fn by_name(&self, name: &str) -> Option<&Campus> {
        self.campuses.iter().find(|c| c.name == name)
    }

    /// Index of the campus with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.campuses.iter().position(|c| c.name == name)
    }

    /// Number of campuses. Always at least one.
    pub fn len(&self) -> usize {
        self.campuses.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.campuses.is_empty()
    }

    /// Index of the campus selected at session start.
    pub fn default_index(&self) -> usize {
        self.default_index
    }
}

impl Default for CampusDirectory {
    fn default() -> Self {
        Self::helsinki()
    }
}
