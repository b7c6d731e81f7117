use std::borrow::Borrow;
use std::fmt;

/// A normalized participant identifier.
///
/// Identifiers are trimmed and case-folded on construction, so two raw
/// tokens naming the same participant compare equal. Ordering is the
/// byte-wise ordering of the normalized string.
///
/// An identifier never contains control characters: this keeps every
/// identifier on a single line of the
/// [adjacency-list format](crate::graph::adjacency_list).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(Box<str>);

impl Identifier {
    /// Normalizes `raw`, returning [`None`] if nothing is left after trimming
    /// or if what is left contains a control character.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_control) {
            return None;
        }
        Some(Self(trimmed.to_lowercase().into_boxed_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
