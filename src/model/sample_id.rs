//! Typed join key between tree leaves and metadata rows.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a sequenced sample, i.e. the label of a leaf.
///
/// A [SampleId] is never empty. Comparison is exact and case-sensitive;
/// no trimming or other normalization happens, so `"A"` and `"A "` are
/// different samples.
///
/// Implements [Borrow<str>] so maps keyed by [SampleId] can be queried
/// with plain `&str` values read from a metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SampleId(String);

impl SampleId {
    /// Creates a new identifier, or `None` if `id` is empty.
    pub fn new<S: Into<String>>(id: S) -> Option<Self> {
        let id = id.into();
        if id.is_empty() { None } else { Some(SampleId(id)) }
    }

    /// Returns the identifier as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SampleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SampleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
