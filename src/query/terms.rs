//! Term parsing for `orderBy` and `search` query values
//!
//! Parsing never fails and never stops at a bad entry: every non-empty raw
//! value yields exactly one term. Deciding which terms are usable is left to
//! resolution against [`ResourceMetadata`](crate::query::metadata::ResourceMetadata).

use crate::query::comparison::ComparisonStrategy;

/// A parsed `orderBy` value: `"<field>[ desc]"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTerm {
    pub name: String,
    pub descending: bool,
    /// True when the term comes from metadata rather than the client
    pub is_default: bool,
}

impl SortTerm {
    fn parse(raw: &str) -> Self {
        let mut tokens = raw.split_whitespace();

        match (tokens.next(), tokens.next()) {
            (None, _) => Self {
                name: raw.to_string(),
                descending: false,
                is_default: false,
            },
            (Some(name), direction) => Self {
                name: name.to_string(),
                descending: direction.is_some_and(|d| d.eq_ignore_ascii_case("desc")),
                is_default: false,
            },
        }
    }
}

/// A parsed `search` value: `"<field> <operator> <value...>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub name: String,
    pub operator: Option<String>,
    pub value: Option<String>,
    /// False when the raw value has fewer than three tokens
    pub valid_syntax: bool,
    /// Set once the term is resolved against a searchable field
    pub comparer: Option<ComparisonStrategy>,
}

impl SearchTerm {
    fn parse(raw: &str) -> Self {
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        if tokens.len() < 3 {
            return Self {
                name: tokens.first().map(|t| t.to_string()).unwrap_or_default(),
                operator: None,
                value: None,
                valid_syntax: false,
                comparer: None,
            };
        }

        Self {
            name: tokens[0].to_string(),
            operator: Some(tokens[1].to_string()),
            value: Some(tokens[2..].join(" ")),
            valid_syntax: true,
            comparer: None,
        }
    }
}

/// Parse raw `orderBy` values, skipping empty entries
pub fn parse_sort_terms<'a, I>(raw: I) -> impl Iterator<Item = SortTerm> + 'a
where
    I: IntoIterator<Item = &'a String>,
    I::IntoIter: 'a,
{
    raw.into_iter()
        .filter(|s| !s.is_empty())
        .map(|s| SortTerm::parse(s))
}

/// Parse raw `search` values, skipping empty entries
pub fn parse_search_terms<'a, I>(raw: I) -> impl Iterator<Item = SearchTerm> + 'a
where
    I: IntoIterator<Item = &'a String>,
    I::IntoIter: 'a,
{
    raw.into_iter()
        .filter(|s| !s.is_empty())
        .map(|s| SearchTerm::parse(s))
}
