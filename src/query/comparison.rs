//! Comparison strategies and search operators

use crate::core::field::FieldValue;
use std::cmp::Ordering;
use std::fmt;

/// An executable comparison named by a search operator token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOperator {
    /// `eq`, exact under every strategy
    Eq,
    /// `gt`
    Gt,
    /// `gte`
    Gte,
    /// `lt`
    Lt,
    /// `lte`
    Lte,
    /// `sw`, case-insensitive prefix match on strings
    StartsWith,
    /// `co`, case-insensitive substring match on strings
    Contains,
}

impl SearchOperator {
    /// The query-string token for this operator
    pub fn token(&self) -> &'static str {
        match self {
            SearchOperator::Eq => "eq",
            SearchOperator::Gt => "gt",
            SearchOperator::Gte => "gte",
            SearchOperator::Lt => "lt",
            SearchOperator::Lte => "lte",
            SearchOperator::StartsWith => "sw",
            SearchOperator::Contains => "co",
        }
    }

    /// Evaluate `actual <op> expected`
    ///
    /// Incomparable values never match.
    pub fn matches(&self, actual: &FieldValue, expected: &FieldValue) -> bool {
        if actual.is_null() {
            return false;
        }

        match self {
            SearchOperator::StartsWith => Self::text(actual, expected, |a, e| a.starts_with(e)),
            SearchOperator::Contains => Self::text(actual, expected, |a, e| a.contains(e)),
            SearchOperator::Eq => actual.compare(expected) == Some(Ordering::Equal),
            SearchOperator::Gt => actual.compare(expected) == Some(Ordering::Greater),
            SearchOperator::Gte => matches!(
                actual.compare(expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            SearchOperator::Lt => actual.compare(expected) == Some(Ordering::Less),
            SearchOperator::Lte => matches!(
                actual.compare(expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }

    fn text(actual: &FieldValue, expected: &FieldValue, op: impl Fn(&str, &str) -> bool) -> bool {
        match (actual.as_string(), expected.as_string()) {
            (Some(actual), Some(expected)) => op(&actual.to_lowercase(), &expected.to_lowercase()),
            _ => false,
        }
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// How a searchable field may be compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonStrategy {
    /// Only `eq`
    #[default]
    Equality,
    /// `eq`, `gt`, `gte`, `lt`, `lte`
    Range,
    /// `eq` (exact), `sw`, `co`
    Text,
}

impl ComparisonStrategy {
    /// Operators this strategy accepts
    pub const fn operators(&self) -> &'static [SearchOperator] {
        match self {
            ComparisonStrategy::Equality => &[SearchOperator::Eq],
            ComparisonStrategy::Range => &[
                SearchOperator::Eq,
                SearchOperator::Gt,
                SearchOperator::Gte,
                SearchOperator::Lt,
                SearchOperator::Lte,
            ],
            ComparisonStrategy::Text => &[
                SearchOperator::Eq,
                SearchOperator::StartsWith,
                SearchOperator::Contains,
            ],
        }
    }

    /// Resolve an operator token (case-insensitive) into an executable comparison
    ///
    /// Returns `None` when the token is unknown or not supported by this strategy.
    pub fn resolve(&self, token: &str) -> Option<SearchOperator> {
        self.operators()
            .iter()
            .copied()
            .find(|op| op.token().eq_ignore_ascii_case(token))
    }
}
