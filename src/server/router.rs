//! Route table of the REST API

use crate::server::handlers::{
    AppState, get_asset, get_asset_detail, get_category, health, list_asset_details, list_assets,
    list_categories, root,
};
use axum::{Router, http::Method, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the inventory routes
///
/// - GET / - Entry document
/// - GET /assets - Paged, sortable, searchable assets
/// - GET /assets/{asset_id} - One asset with its details embedded
/// - GET /assets/{asset_id}/details - Paged details of an asset
/// - GET /assets/{asset_id}/details/{detail_id} - One detail
/// - GET /categories - Paged, sortable, searchable categories
/// - GET /categories/{category_id} - One category
/// - GET /health - Liveness
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/", get(root))
        .route("/assets", get(list_assets))
        .route("/assets/{asset_id}", get(get_asset))
        .route("/assets/{asset_id}/details", get(list_asset_details))
        .route(
            "/assets/{asset_id}/details/{detail_id}",
            get(get_asset_detail),
        )
        .route("/categories", get(list_categories))
        .route("/categories/{category_id}", get(get_category))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
