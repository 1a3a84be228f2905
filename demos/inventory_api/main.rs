//! Inventory API example serving a small seeded household inventory
//!
//! Run with `cargo run --example inventory_api [config.yaml]`, then try:
//!
//! ```text
//! curl 'http://127.0.0.1:3000/assets?orderBy=value%20desc&pageSize=2'
//! curl 'http://127.0.0.1:3000/assets?search=name%20co%20lamp'
//! ```

use stash::prelude::*;
use stash::server::telemetry::DEFAULT_DIRECTIVES;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(DEFAULT_DIRECTIVES);

    let config = match std::env::args().nth(1) {
        Some(path) => StashConfig::from_yaml_file(path)?,
        None => StashConfig::default_config(),
    };

    let furniture = Category::new("Furniture");
    let electronics = Category::new("Electronics");

    let desk = Asset::new("Oak desk")
        .with_category(furniture.id)
        .with_value(450.0)
        .acquired_on("2019-05-12T00:00:00Z".parse::<DateTime<Utc>>()?);
    let lamp = Asset::new("Desk lamp")
        .with_category(electronics.id)
        .with_parent(desk.id)
        .with_value(40.0);
    let laptop = Asset::new("Laptop")
        .with_category(electronics.id)
        .with_value(1299.0)
        .acquired_on("2023-01-20T00:00:00Z".parse::<DateTime<Utc>>()?);
    let bookshelf = Asset::new("Bookshelf").with_category(furniture.id);

    let details = vec![
        Detail::new(desk.id, "width", "dimension", "140cm"),
        Detail::new(desk.id, "depth", "dimension", "70cm"),
        Detail::new(laptop.id, "warranty", "warranty", "until 2026-01-20"),
        Detail::new(lamp.id, "bulb", "spec", "E27 LED"),
    ];

    tracing::info!(
        assets = 4,
        categories = 2,
        details = details.len(),
        "seeded inventory"
    );

    let assets = InMemoryStore::with_entities([desk, lamp, laptop, bookshelf]);

    ServerBuilder::new()
        .with_config(config)
        .with_assets(assets)
        .with_categories(InMemoryStore::with_entities([furniture, electronics]))
        .with_details(InMemoryStore::with_entities(details))
        .serve(None)
        .await
}
