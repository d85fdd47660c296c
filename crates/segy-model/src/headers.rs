//! Aligned per-trace index header columns.

use serde::{Deserialize, Serialize};

use crate::error::{GridOverrideError, Result};

/// Name of the synthetic ordinal header added by duplicate-index handling.
pub const TRACE_HEADER: &str = "trace";

/// Per-trace integer index headers in original file order.
///
/// Every column has the same length (one value per trace) and columns keep
/// their insertion order. Mutable access hands out slices, never the
/// backing `Vec`, so a transform cannot desynchronize one column from the
/// others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHeaderSet {
    columns: Vec<(String, Vec<i64>)>,
}

impl IndexHeaderSet {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of traces covered by every column.
    pub fn trace_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    /// True when no columns are present.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Whether a header with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Values for a header, if present.
    pub fn column(&self, name: &str) -> Option<&[i64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Mutable values for a header, if present. The slice borrow keeps the
    /// column length fixed.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut [i64]> {
        self.columns
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_mut_slice())
    }

    /// Add a column, or replace an existing one of the same name.
    ///
    /// Fails with [`GridOverrideError::MismatchedHeaderLength`] when the
    /// new column's length disagrees with the columns already held.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<i64>) -> Result<()> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.trace_count() {
            return Err(GridOverrideError::MismatchedHeaderLength {
                name,
                expected: self.trace_count(),
                actual: values.len(),
            });
        }

        if let Some((_, existing)) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            *existing = values;
        } else {
            self.columns.push((name, values));
        }

        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for constructing test and
    /// caller fixtures.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<i64>) -> Result<Self> {
        self.insert(name, values)?;
        Ok(self)
    }
}
