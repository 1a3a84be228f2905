//! HTTP handlers for the inventory resources
//!
//! Collection handlers share one flow: query pairs → [`CollectionQuery`] →
//! [`QueryPipeline`] → [`PagedCollection`] → link rewriting → JSON.

use crate::config::StashConfig;
use crate::core::error::{StashError, StashResult};
use crate::core::{EntitySource, IntoResource, Queryable};
use crate::inventory::{
    Asset, AssetResource, Category, CategoryResource, Detail, DetailResource, RootResource,
    routes,
};
use crate::links::{Hypermedia, Link, LinkRewriter, PagedCollection, RouteTable};
use crate::query::{CollectionQuery, QueryPipeline};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub assets: Arc<dyn EntitySource<Asset>>,
    pub categories: Arc<dyn EntitySource<Category>>,
    pub details: Arc<dyn EntitySource<Detail>>,
    pub pipeline: QueryPipeline,
    pub routes: Arc<RouteTable>,
    pub config: Arc<StashConfig>,
}

type QueryPairs = Query<Vec<(String, String)>>;

impl AppState {
    /// Rewrite the payload's links and serialize it
    fn respond<T>(&self, status: StatusCode, mut payload: T) -> Response
    where
        T: Hypermedia + Serialize,
    {
        LinkRewriter::new(self.routes.as_ref()).rewrite_response(status, Some(&mut payload));
        (status, Json(payload)).into_response()
    }

    /// Run a collection query and wrap the page in its envelope
    ///
    /// The self link reproduces the request's sort and search values. If the
    /// client goes away, dropping this future cancels `cancel`.
    async fn collection<E, S>(
        &self,
        source: &S,
        route: Link,
        pairs: Vec<(String, String)>,
        cancel: CancellationToken,
    ) -> StashResult<PagedCollection<E::Resource>>
    where
        E: Queryable + IntoResource,
        S: EntitySource<E> + ?Sized,
    {
        let query = CollectionQuery::from_pairs(pairs)?.with_paging(&self.config.paging)?;

        let guard = cancel.clone().drop_guard();
        let result = self.pipeline.execute(source, &query, &cancel).await;
        guard.disarm();
        let result = result?;

        tracing::debug!(
            resource = E::resource_name(),
            offset = ?query.window.offset,
            page_size = ?query.window.page_size,
            total = result.total_size,
            "collection page"
        );

        let self_link = route.with_values(query.route_values());
        let items = result.items.iter().map(IntoResource::to_resource).collect();
        Ok(PagedCollection::build(
            self_link,
            items,
            result.total_size,
            query.window,
        ))
    }

    async fn asset(&self, id: Uuid) -> StashResult<Asset> {
        self.assets
            .get(&id)
            .await?
            .ok_or_else(|| not_found("asset", id))
    }

    async fn details_of(&self, asset_id: Uuid) -> StashResult<Vec<Detail>> {
        let details = self.details.list().await?;
        Ok(details
            .into_iter()
            .filter(|d| d.asset_id == asset_id)
            .collect())
    }
}

fn not_found(resource: &str, id: Uuid) -> StashError {
    StashError::NotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Response {
    state.respond(StatusCode::OK, RootResource::default())
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "stash"
    }))
}

/// GET /assets
pub async fn list_assets(
    State(state): State<AppState>,
    Query(pairs): QueryPairs,
) -> StashResult<Response> {
    let page = state
        .collection::<Asset, _>(
            state.assets.as_ref(),
            Link::to_collection(routes::ASSETS),
            pairs,
            CancellationToken::new(),
        )
        .await?;
    Ok(state.respond(StatusCode::OK, page))
}

/// GET /assets/{assetId}
///
/// Embeds the asset's details in default order.
pub async fn get_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> StashResult<Response> {
    let asset = state.asset(asset_id).await?;
    let details = state.details_of(asset_id).await?;
    let details = state
        .pipeline
        .apply(details, &CollectionQuery::default())?
        .items
        .iter()
        .map(IntoResource::to_resource)
        .collect();

    let resource: AssetResource = asset.to_resource().with_details(details);
    Ok(state.respond(StatusCode::OK, resource))
}

/// GET /assets/{assetId}/details
pub async fn list_asset_details(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
    Query(pairs): QueryPairs,
) -> StashResult<Response> {
    state.asset(asset_id).await?;
    let details = state.details_of(asset_id).await?;

    let route = Link::to_collection(routes::ASSET_DETAILS).with_value(routes::ASSET_ID, asset_id);
    let page = state
        .collection::<Detail, _>(&details, route, pairs, CancellationToken::new())
        .await?;
    Ok(state.respond(StatusCode::OK, page))
}

/// GET /assets/{assetId}/details/{detailId}
pub async fn get_asset_detail(
    State(state): State<AppState>,
    Path((asset_id, detail_id)): Path<(Uuid, Uuid)>,
) -> StashResult<Response> {
    let detail = state
        .details
        .get(&detail_id)
        .await?
        .filter(|d| d.asset_id == asset_id)
        .ok_or_else(|| not_found("detail", detail_id))?;

    let resource: DetailResource = detail.to_resource();
    Ok(state.respond(StatusCode::OK, resource))
}

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(pairs): QueryPairs,
) -> StashResult<Response> {
    let page = state
        .collection::<Category, _>(
            state.categories.as_ref(),
            Link::to_collection(routes::CATEGORIES),
            pairs,
            CancellationToken::new(),
        )
        .await?;
    Ok(state.respond(StatusCode::OK, page))
}

/// GET /categories/{categoryId}
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> StashResult<Response> {
    let category = state
        .categories
        .get(&category_id)
        .await?
        .ok_or_else(|| not_found("category", category_id))?;

    let resource: CategoryResource = category.to_resource();
    Ok(state.respond(StatusCode::OK, resource))
}
