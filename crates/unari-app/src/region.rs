//! Hit-test regions from the most recent render.

/// Rectangle in 0-based terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Region {
    /// Create a region.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the cell `(x, y)` lies inside. Empty regions contain nothing.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }
}

/// Named regions of the last rendered frame, in render order.
///
/// Recomputed on every render and only used to resolve pointer events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    regions: Vec<(String, Region)>,
}

impl RegionMap {
    /// An empty map. Nothing is hit-testable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` at `region`, replacing an earlier entry of that name.
    pub fn insert(&mut self, name: impl Into<String>, region: Region) {
        let name = name.into();
        if let Some(slot) = self.regions.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = region;
        } else {
            self.regions.push((name, region));
        }
    }

    /// Region recorded for `name`.
    pub fn get(&self, name: &str) -> Option<Region> {
        self.regions.iter().find(|(n, _)| n == name).map(|(_, r)| *r)
    }

    /// Name of the first region containing `(x, y)`.
    pub fn hit(&self, x: u16, y: u16) -> Option<&str> {
        self.regions.iter().find(|(_, r)| r.contains(x, y)).map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, region)` pairs in render order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Region)> {
        self.regions.iter().map(|(n, r)| (n.as_str(), *r))
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Region::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn empty_region_contains_nothing() {
        assert!(!Region::new(0, 0, 0, 5).contains(0, 0));
    }

    #[test]
    fn edge_of_screen_does_not_overflow() {
        let r = Region::new(u16::MAX - 1, 0, 10, 1);
        assert!(r.contains(u16::MAX, 0));
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut map = RegionMap::new();
        map.insert("A", Region::new(0, 0, 1, 1));
        map.insert("A", Region::new(5, 5, 1, 1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.hit(5, 5), Some("A"));
        assert_eq!(map.hit(0, 0), None);
    }
}
