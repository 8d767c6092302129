//! Category classification and frequency summary for a single column.
//!
//! [`classify`] is the core of the crate: a pure, single-pass tally of a
//! column's values against an ordered list of [`CategoryRule`]s. Everything
//! else in the crate (ingestion, charts, HTTP) feeds into or out of it.
//!
//! Matching contract:
//!
//! - Values are normalized to their trimmed, upper-cased string form.
//! - A value belongs to a category if **any** of the rule's patterns is a
//!   substring of the normalized form.
//! - Rules are tested in order; the **first** matching rule wins. Rule order
//!   is therefore part of the contract, not an implementation detail (see
//!   [`default_rules`]).
//! - `Null` values and values matching no rule land in the Other bucket.

use serde::Serialize;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::CellValue;

/// A named category with its case-insensitive substring patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Category name reported in results.
    pub name: String,
    /// Substring patterns; a value matches if any pattern occurs in its
    /// normalized (trimmed, upper-cased) string form.
    pub patterns: Vec<String>,
}

impl CategoryRule {
    /// Create a rule from a name and patterns.
    pub fn new(
        name: impl Into<String>,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// The rule set used by the CLI and HTTP surfaces.
///
/// Order matters: `Enfra` is tested before `SMS LD`, so a value containing
/// both substrings counts as `Enfra`. This precedence is deliberate and
/// relied upon by callers.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("Enfra", ["ENFRA"]),
        CategoryRule::new("SMS LD", ["SMS LD", "SMS-LD"]),
    ]
}

/// One category's tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category name (from the matching [`CategoryRule`]).
    pub name: String,
    /// Number of values assigned to this category.
    pub count: usize,
}

/// Result of classifying one column.
///
/// Invariant: the per-category counts plus [`Classification::other`] sum to
/// [`Classification::total`], which equals the input column length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Per-category counts, in rule order.
    pub categories: Vec<CategoryCount>,
    /// Null values and values matching no rule.
    pub other: usize,
    /// Total number of values seen (column length).
    pub total: usize,
}

impl Classification {
    /// Look up a category count by name.
    pub fn count_for(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.count)
    }
}

/// Classify every value of `column` against `rules` (first match wins).
///
/// - `Null` values count toward the Other bucket without touching the rules.
/// - Fails with [`AnalysisError::InvalidRules`] if `rules` is empty, or any
///   rule has no patterns or an empty pattern. No partial counts are
///   returned on error.
/// - An empty column succeeds with all counts zero.
///
/// Pure function over in-memory data: deterministic for identical input
/// order, no I/O, no shared state.
///
/// # Examples
///
/// ```
/// use column_tally::classify::{classify, default_rules};
/// use column_tally::types::CellValue;
///
/// let column = vec![
///     CellValue::Text("Enfra".into()),
///     CellValue::Text("sms ld".into()),
///     CellValue::Null,
/// ];
/// let result = classify(&column, &default_rules()).unwrap();
/// assert_eq!(result.count_for("Enfra"), Some(1));
/// assert_eq!(result.count_for("SMS LD"), Some(1));
/// assert_eq!(result.other, 1);
/// assert_eq!(result.total, 3);
/// ```
pub fn classify(column: &[CellValue], rules: &[CategoryRule]) -> AnalysisResult<Classification> {
    validate_rules(rules)?;

    // Normalize patterns once, not per cell.
    let upper_rules: Vec<Vec<String>> = rules
        .iter()
        .map(|r| r.patterns.iter().map(|p| p.to_uppercase()).collect())
        .collect();

    let mut counts = vec![0usize; rules.len()];
    let mut other = 0usize;

    for value in column {
        if value.is_null() {
            other += 1;
            continue;
        }
        let normalized = value.display_string().trim().to_uppercase();
        match upper_rules
            .iter()
            .position(|patterns| patterns.iter().any(|p| normalized.contains(p.as_str())))
        {
            Some(idx) => counts[idx] += 1,
            None => other += 1,
        }
    }

    let categories = rules
        .iter()
        .zip(counts)
        .map(|(rule, count)| CategoryCount {
            name: rule.name.clone(),
            count,
        })
        .collect();

    Ok(Classification {
        categories,
        other,
        total: column.len(),
    })
}

fn validate_rules(rules: &[CategoryRule]) -> AnalysisResult<()> {
    if rules.is_empty() {
        return Err(AnalysisError::InvalidRules {
            message: "rule list is empty".to_string(),
        });
    }
    for rule in rules {
        if rule.patterns.is_empty() {
            return Err(AnalysisError::InvalidRules {
                message: format!("rule '{}' has no patterns", rule.name),
            });
        }
        if rule.patterns.iter().any(|p| p.is_empty()) {
            return Err(AnalysisError::InvalidRules {
                message: format!("rule '{}' has an empty pattern", rule.name),
            });
        }
    }
    Ok(())
}

/// One distinct raw value and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    /// Raw string form of the value.
    pub value: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Frequency breakdown of the top `n` distinct non-null values.
///
/// Sorted by descending count; ties keep first-seen order. Null cells are
/// skipped. Diagnostic display only, not part of the classification
/// contract.
pub fn top_values(column: &[CellValue], n: usize) -> Vec<ValueCount> {
    let mut order: Vec<ValueCount> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for value in column {
        if value.is_null() {
            continue;
        }
        let raw = value.display_string();
        match index.get(&raw) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(raw.clone(), order.len());
                order.push(ValueCount { value: raw, count: 1 });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(n);
    order
}

#[cfg(test)]
mod tests {
    use super::{classify, default_rules, top_values, CategoryRule};
    use crate::error::AnalysisError;
    use crate::types::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn mixed_column() -> Vec<CellValue> {
        vec![
            text("Enfra"),
            text("sms ld"),
            CellValue::Null,
            text("ENFRA-West"),
            text("Other"),
            text("SMS-LD"),
        ]
    }

    #[test]
    fn classifies_mixed_column() {
        let result = classify(&mixed_column(), &default_rules()).unwrap();
        assert_eq!(result.count_for("Enfra"), Some(2));
        assert_eq!(result.count_for("SMS LD"), Some(2));
        assert_eq!(result.other, 2);
        assert_eq!(result.total, 6);
    }

    #[test]
    fn counts_sum_to_column_length() {
        let column = mixed_column();
        let result = classify(&column, &default_rules()).unwrap();
        let sum: usize = result.categories.iter().map(|c| c.count).sum::<usize>() + result.other;
        assert_eq!(sum, column.len());
        assert_eq!(result.total, column.len());
    }

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        let column = vec![text("  enfra  "), text("Sms-Ld backlog")];
        let result = classify(&column, &default_rules()).unwrap();
        assert_eq!(result.count_for("Enfra"), Some(1));
        assert_eq!(result.count_for("SMS LD"), Some(1));
    }

    #[test]
    fn null_always_lands_in_other() {
        let column = vec![CellValue::Null, CellValue::Null];
        let result = classify(&column, &default_rules()).unwrap();
        assert_eq!(result.other, 2);
        assert_eq!(result.count_for("Enfra"), Some(0));
    }

    #[test]
    fn earlier_rule_wins_when_both_match() {
        // Contains both ENFRA and SMS LD; Enfra is first in the default rules.
        let column = vec![text("ENFRA / SMS LD combined")];
        let result = classify(&column, &default_rules()).unwrap();
        assert_eq!(result.count_for("Enfra"), Some(1));
        assert_eq!(result.count_for("SMS LD"), Some(0));

        // Reversed order flips the assignment.
        let reversed = vec![
            CategoryRule::new("SMS LD", ["SMS LD", "SMS-LD"]),
            CategoryRule::new("Enfra", ["ENFRA"]),
        ];
        let result = classify(&column, &reversed).unwrap();
        assert_eq!(result.count_for("SMS LD"), Some(1));
        assert_eq!(result.count_for("Enfra"), Some(0));
    }

    #[test]
    fn empty_column_succeeds_with_zero_counts() {
        let result = classify(&[], &default_rules()).unwrap();
        assert_eq!(result.total, 0);
        assert_eq!(result.other, 0);
        assert!(result.categories.iter().all(|c| c.count == 0));
    }

    #[test]
    fn empty_rules_are_rejected() {
        let err = classify(&mixed_column(), &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRules { .. }));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let rules = vec![CategoryRule::new("Broken", [""])];
        let err = classify(&mixed_column(), &rules).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRules { .. }));
    }

    #[test]
    fn non_text_cells_are_matched_on_their_string_form() {
        let rules = vec![CategoryRule::new("FortyTwo", ["42"])];
        let column = vec![
            CellValue::Int64(42),
            CellValue::Float64(42.0),
            CellValue::Float64(7.5),
        ];
        let result = classify(&column, &rules).unwrap();
        assert_eq!(result.count_for("FortyTwo"), Some(2));
        assert_eq!(result.other, 1);
    }

    #[test]
    fn top_values_sorts_descending_with_first_seen_tie_break() {
        let column = vec![
            text("b"),
            text("a"),
            text("a"),
            CellValue::Null,
            text("c"),
            text("b"),
            text("a"),
        ];
        let top = top_values(&column, 10);
        let pairs: Vec<(&str, usize)> = top.iter().map(|v| (v.value.as_str(), v.count)).collect();
        assert_eq!(pairs, vec![("a", 3), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn top_values_breaks_ties_by_first_seen_order() {
        let column = vec![text("x"), text("y"), text("y"), text("x")];
        let top = top_values(&column, 10);
        let pairs: Vec<(&str, usize)> = top.iter().map(|v| (v.value.as_str(), v.count)).collect();
        assert_eq!(pairs, vec![("x", 2), ("y", 2)]);
    }

    #[test]
    fn top_values_truncates_and_is_idempotent() {
        let column = vec![text("a"), text("a"), text("b"), text("c")];
        let first = top_values(&column, 2);
        let second = top_values(&column, 2);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].value, "a");
    }
}
