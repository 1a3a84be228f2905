//! A small expression tree interpreted against entities
//!
//! Search terms become [`Predicate`]s (field selector, operator, typed
//! literal) and sort terms become [`SortKey`]s. A [`QueryPlan`] is built up
//! front so that an invalid search term rejects the whole query before any
//! entity is touched.

use crate::core::Entity;
use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::query::comparison::SearchOperator;
use crate::query::metadata::ResourceMetadata;
use crate::query::options::{SearchOptions, SortOptions};
use crate::query::terms::{SearchTerm, SortTerm};
use std::cmp::Ordering;

/// `field <operator> literal`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: &'static str,
    pub operator: SearchOperator,
    pub literal: FieldValue,
}

impl Predicate {
    /// Build a predicate from a resolved search term
    ///
    /// Fails when the field's strategy does not support the operator or
    /// when the literal is not a value of the field's declared type.
    pub fn build(term: &SearchTerm, metadata: &ResourceMetadata) -> Result<Self, QueryError> {
        let operator_token = term.operator.as_deref().unwrap_or_default();
        let value = term.value.as_deref().unwrap_or_default();

        let invalid = |reason: String| QueryError::InvalidSearchOperation {
            field: term.name.clone(),
            operator: operator_token.to_string(),
            value: value.to_string(),
            reason,
        };

        let field = metadata
            .searchable(&term.name)
            .ok_or_else(|| invalid("field is not searchable".to_string()))?;

        let strategy = term.comparer.unwrap_or_else(|| field.strategy());
        let operator = strategy.resolve(operator_token).ok_or_else(|| {
            let supported: Vec<_> = strategy.operators().iter().map(|op| op.token()).collect();
            invalid(format!(
                "operator not supported, expected one of: {}",
                supported.join(", ")
            ))
        })?;

        let literal = field.field_type.parse_literal(value).ok_or_else(|| {
            invalid(format!(
                "value is not a valid {}",
                field.field_type.as_str()
            ))
        })?;

        Ok(Self {
            field: field.name,
            operator,
            literal,
        })
    }

    pub fn evaluate<E: Entity>(&self, entity: &E) -> bool {
        entity
            .field_value(self.field)
            .is_some_and(|actual| self.operator.matches(&actual, &self.literal))
    }
}

/// One level of ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub descending: bool,
}

impl SortKey {
    fn build(term: &SortTerm, metadata: &ResourceMetadata) -> Option<Self> {
        metadata.sortable(&term.name).map(|field| Self {
            field: field.name,
            descending: term.descending,
        })
    }

    /// Compare two entities on this key; incomparable values are equal
    pub fn compare<E: Entity>(&self, a: &E, b: &E) -> Ordering {
        let left = a.field_value(self.field).unwrap_or(FieldValue::Null);
        let right = b.field_value(self.field).unwrap_or(FieldValue::Null);
        let ordering = left.compare(&right).unwrap_or(Ordering::Equal);

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Executable search predicates (ANDed) and chained sort keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPlan {
    pub predicates: Vec<Predicate>,
    pub ordering: Vec<SortKey>,
}

impl QueryPlan {
    /// Resolve sort and search options against a type's metadata
    pub fn build(
        sort: &SortOptions,
        search: &SearchOptions,
        metadata: &ResourceMetadata,
    ) -> Result<Self, QueryError> {
        Ok(Self {
            predicates: Self::predicates(search, metadata)?,
            ordering: Self::ordering(sort, metadata),
        })
    }

    /// Build every search predicate, failing on the first invalid one
    pub fn predicates(
        search: &SearchOptions,
        metadata: &ResourceMetadata,
    ) -> Result<Vec<Predicate>, QueryError> {
        search
            .valid_terms(metadata)
            .iter()
            .map(|term| Predicate::build(term, metadata))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                tracing::warn!(resource = metadata.resource(), error = %e, "rejected search");
            })
    }

    /// Sort keys of the valid terms, or of the default-sort fields
    pub fn ordering(sort: &SortOptions, metadata: &ResourceMetadata) -> Vec<SortKey> {
        sort.valid_terms(metadata)
            .iter()
            .filter_map(|term| SortKey::build(term, metadata))
            .collect()
    }

    /// True when the entity satisfies every predicate
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        self.predicates.iter().all(|p| p.evaluate(entity))
    }

    /// Stable sort by the chained keys; no keys leaves the order untouched
    pub fn order<E: Entity>(&self, items: &mut [E]) {
        if self.ordering.is_empty() {
            return;
        }

        items.sort_by(|a, b| {
            self.ordering
                .iter()
                .map(|key| key.compare(a, b))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }
}
