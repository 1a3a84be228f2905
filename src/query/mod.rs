//! Sorting, searching and paging of entity collections
//!
//! Raw query-string values are parsed into terms, resolved against each
//! entity type's static metadata, compiled into a [`QueryPlan`] and run by
//! the [`QueryPipeline`] in a fixed order: search, sort, count, window.

pub mod comparison;
pub mod expression;
pub mod metadata;
pub mod options;
pub mod pipeline;
pub mod terms;

pub use comparison::{ComparisonStrategy, SearchOperator};
pub use expression::{Predicate, QueryPlan, SortKey};
pub use metadata::{MetadataRegistry, QueryField, ResourceMetadata};
pub use options::{CollectionQuery, PageWindow, SearchOptions, SortOptions};
pub use pipeline::{QueryPipeline, QueryResult};
pub use terms::{SearchTerm, SortTerm};
