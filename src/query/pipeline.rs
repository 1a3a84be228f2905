//! Query pipeline: search, sort, count, window

use crate::core::Queryable;
use crate::core::error::{QueryError, StashError, StashResult};
use crate::core::service::EntitySource;
use crate::query::expression::QueryPlan;
use crate::query::metadata::MetadataRegistry;
use crate::query::options::{CollectionQuery, PageWindow};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// How many entities are filtered between two cancellation checks
const CANCEL_CHECK_INTERVAL: usize = 1024;

/// One page of entities plus the size of the full filtered set
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<E> {
    pub items: Vec<E>,

    /// Count after search, before windowing
    pub total_size: usize,
}

impl<E> QueryResult<E> {
    pub fn map<R>(self, f: impl FnMut(E) -> R) -> QueryResult<R> {
        QueryResult {
            items: self.items.into_iter().map(f).collect(),
            total_size: self.total_size,
        }
    }
}

/// Applies a [`CollectionQuery`] to the entities of a source
///
/// Cheap to clone; every clone shares the same [`MetadataRegistry`].
#[derive(Debug, Clone, Default)]
pub struct QueryPipeline {
    registry: Arc<MetadataRegistry>,
}

impl QueryPipeline {
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<MetadataRegistry> {
        &self.registry
    }

    /// Resolve the query against `E`'s metadata
    ///
    /// Every search term is checked here, so an invalid one fails the whole
    /// query before a single entity is filtered.
    pub fn plan<E: Queryable>(&self, query: &CollectionQuery) -> Result<QueryPlan, QueryError> {
        let metadata = self.registry.resolve::<E>();
        QueryPlan::build(&query.sort, &query.search, &metadata)
    }

    /// Run the query synchronously over already loaded entities
    pub fn apply<E: Queryable>(
        &self,
        items: Vec<E>,
        query: &CollectionQuery,
    ) -> StashResult<QueryResult<E>> {
        let plan = self.plan::<E>(query)?;
        evaluate(&plan, items, query.window, &CancellationToken::new())
    }

    /// Enumerate the source and run the query off the async runtime
    ///
    /// Cancelling `cancel` abandons the query with [`StashError::Cancelled`]
    /// at the next check point.
    pub async fn execute<E, S>(
        &self,
        source: &S,
        query: &CollectionQuery,
        cancel: &CancellationToken,
    ) -> StashResult<QueryResult<E>>
    where
        E: Queryable,
        S: EntitySource<E> + ?Sized,
    {
        let plan = self.plan::<E>(query)?;

        let items = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(StashError::Cancelled),
            items = source.list() => items?,
        };

        let window = query.window;
        let token = cancel.clone();
        let task = tokio::task::spawn_blocking(move || evaluate(&plan, items, window, &token));

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StashError::Cancelled),
            joined = task => joined.map_err(|e| StashError::Internal(e.to_string()))?,
        };

        if let Ok(page) = &result {
            tracing::debug!(
                resource = E::resource_name(),
                total = page.total_size,
                returned = page.items.len(),
                "query executed"
            );
        }

        result
    }
}

fn evaluate<E: Queryable>(
    plan: &QueryPlan,
    items: Vec<E>,
    window: PageWindow,
    cancel: &CancellationToken,
) -> StashResult<QueryResult<E>> {
    let mut matched = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if index % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return Err(StashError::Cancelled);
        }
        if plan.matches(&item) {
            matched.push(item);
        }
    }

    plan.order(&mut matched);
    if cancel.is_cancelled() {
        return Err(StashError::Cancelled);
    }

    let total_size = matched.len();
    Ok(QueryResult {
        items: window.slice(matched),
        total_size,
    })
}
