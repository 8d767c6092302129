//! Target-column resolution.
//!
//! The source workbooks are irregular: the column of interest is usually
//! headed `L`, but some exports carry real header names, in which case the
//! column sits at a known position instead. Resolution is therefore a
//! two-step strategy: exact header name match first, then a fixed zero-based
//! positional fallback.

use crate::error::{AnalysisError, AnalysisResult};

/// How to locate the target column among the sheet headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelector {
    /// Header name to match exactly.
    pub name: String,
    /// Zero-based position to fall back to when the name is absent.
    pub fallback_index: usize,
}

impl Default for ColumnSelector {
    /// The convention of the source workbooks: header `L`, position 11.
    fn default() -> Self {
        Self {
            name: "L".to_string(),
            fallback_index: 11,
        }
    }
}

/// A concrete column picked by [`ColumnSelector::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Zero-based column index.
    pub index: usize,
    /// Header name at that index (may differ from the selector name when
    /// the positional fallback was used).
    pub name: String,
}

impl ColumnSelector {
    /// Create a selector from a name and fallback position.
    pub fn new(name: impl Into<String>, fallback_index: usize) -> Self {
        Self {
            name: name.into(),
            fallback_index,
        }
    }

    /// Resolve against a header row.
    ///
    /// Tries an exact name match first, then the positional fallback if
    /// enough columns exist. Fails with [`AnalysisError::ColumnNotFound`]
    /// otherwise.
    pub fn resolve(&self, headers: &[String]) -> AnalysisResult<ResolvedColumn> {
        if let Some(index) = headers.iter().position(|h| h == &self.name) {
            return Ok(ResolvedColumn {
                index,
                name: headers[index].clone(),
            });
        }
        if let Some(name) = headers.get(self.fallback_index) {
            return Ok(ResolvedColumn {
                index: self.fallback_index,
                name: name.clone(),
            });
        }
        Err(AnalysisError::ColumnNotFound {
            target: self.name.clone(),
            columns: headers.len(),
        })
    }
}
