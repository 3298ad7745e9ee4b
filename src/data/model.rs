use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

// ---------------------------------------------------------------------------
// XKey – hashable wrapper around an x coordinate
// ---------------------------------------------------------------------------

/// An x value usable as a map key.
///
/// Equality and hashing go through the bit pattern, with `-0.0` folded into
/// `0.0` so both spellings address the same point.
#[derive(Debug, Clone, Copy)]
pub struct XKey(f64);

impl XKey {
    pub fn new(x: f64) -> Self {
        if x == 0.0 {
            XKey(0.0)
        } else {
            XKey(x)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for XKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for XKey {}

impl Hash for XKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

// ---------------------------------------------------------------------------
// Series – one legend entry and its data block
// ---------------------------------------------------------------------------

/// A named data series. Points keep file order; a repeated x overwrites the
/// earlier y in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    points: IndexMap<XKey, f64>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Series {
            name: name.into(),
            points: IndexMap::new(),
        }
    }

    /// Insert a point, returning the y it replaced if x was already present.
    pub fn insert(&mut self, x: f64, y: f64) -> Option<f64> {
        self.points.insert(XKey::new(x), y)
    }

    /// Points in insertion order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|(x, y)| (x.value(), *y))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Document – one parsed .agr file
// ---------------------------------------------------------------------------

/// Title plus every series declared in the header, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub series: Vec<Series>,
}

impl Document {
    /// Replace the parsed title. An empty override keeps the original.
    pub fn override_title(&mut self, title: Option<&str>) {
        if let Some(t) = title.filter(|t| !t.is_empty()) {
            self.title = t.to_string();
        }
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    /// Number of declared series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_x_overwrites_in_place() {
        let mut s = Series::new("rmsd");
        assert_eq!(s.insert(0.0, 1.0), None);
        assert_eq!(s.insert(1.0, 5.0), None);
        assert_eq!(s.insert(0.0, 2.0), Some(1.0));

        assert_eq!(s.len(), 2);
        assert_eq!(s.points().collect::<Vec<_>>(), vec![(0.0, 2.0), (1.0, 5.0)]);
    }

    #[test]
    fn negative_zero_is_same_key() {
        let mut s = Series::new("a");
        s.insert(-0.0, 1.0);
        assert_eq!(s.insert(0.0, 3.0), Some(1.0));
        assert_eq!(s.points().collect::<Vec<_>>(), vec![(0.0, 3.0)]);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn empty_title_override_is_ignored() {
        let mut doc = Document {
            title: "from file".into(),
            series: Vec::new(),
        };
        doc.override_title(Some(""));
        assert_eq!(doc.title, "from file");
        doc.override_title(None);
        assert_eq!(doc.title, "from file");
        doc.override_title(Some("custom"));
        assert_eq!(doc.title, "custom");
    }
}
