use std::collections::BTreeSet;

use super::model::{Document, Series};

// ---------------------------------------------------------------------------
// Selection: which series take part in parsing, plotting and export
// ---------------------------------------------------------------------------

/// A set of series names to keep. `None` (or an empty list) means "keep all".
///
/// The same selection decides which data blocks are parsed and which series
/// are drawn or exported, so the two counts always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: Option<BTreeSet<String>>,
}

impl Selection {
    /// Keep every series.
    pub fn all() -> Self {
        Selection { names: None }
    }

    /// Keep only the named series.
    pub fn restrict_to<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Selection::all()
        } else {
            Selection { names: Some(names) }
        }
    }

    /// Build from an optional CLI list.
    pub fn from_option(names: Option<&[String]>) -> Self {
        match names {
            Some(list) => Selection::restrict_to(list.iter().cloned()),
            None => Selection::all(),
        }
    }

    /// Whether a series with this name passes the filter.
    pub fn contains(&self, name: &str) -> bool {
        match &self.names {
            Some(names) => names.contains(name),
            None => true,
        }
    }

    /// Requested names that match none of the given series names.
    pub fn unmatched<'a>(&'a self, declared: &[&str]) -> Vec<&'a str> {
        match &self.names {
            Some(names) => names
                .iter()
                .map(String::as_str)
                .filter(|n| !declared.contains(n))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Selected series of a document, in declaration order.
    pub fn apply<'a>(&self, doc: &'a Document) -> Vec<&'a Series> {
        filtered_indices(doc, self)
            .into_iter()
            .map(|i| &doc.series[i])
            .collect()
    }
}

/// Return indices of series that pass the selection, in declaration order.
pub fn filtered_indices(doc: &Document, selection: &Selection) -> Vec<usize> {
    doc.series
        .iter()
        .enumerate()
        .filter(|(_, s)| selection.contains(&s.name))
        .map(|(i, _)| i)
        .collect()
}
