//! HTTP-level tests for the inventory API
//!
//! Every test drives the full router: query string → pipeline → envelope →
//! link rewriting → JSON.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use stash::prelude::*;

const BASE: &str = "http://localhost/";

struct Fixture {
    server: TestServer,
    furniture: Category,
    desk: Asset,
    lamp: Asset,
}

fn fixture() -> Fixture {
    fixture_with(StashConfig::default_config())
}

fn fixture_with(mut config: StashConfig) -> Fixture {
    config.server.base_url = BASE.to_string();

    let furniture = Category::new("Furniture");
    let electronics = Category::new("Electronics");

    let desk = Asset::new("Oak desk")
        .with_category(furniture.id)
        .with_value(450.0);
    let lamp = Asset::new("Desk lamp")
        .with_category(electronics.id)
        .with_parent(desk.id)
        .with_value(40.0);
    let laptop = Asset::new("Laptop")
        .with_category(electronics.id)
        .with_value(1299.0);
    let bookshelf = Asset::new("Bookshelf").with_category(furniture.id);

    let details = vec![
        Detail::new(desk.id, "width", "dimension", "140cm"),
        Detail::new(desk.id, "depth", "dimension", "70cm"),
        Detail::new(desk.id, "finish", "material", "oiled oak"),
        Detail::new(lamp.id, "bulb", "spec", "E27 LED"),
    ];

    let router = ServerBuilder::new()
        .with_config(config)
        .with_assets(InMemoryStore::with_entities([
            desk.clone(),
            lamp.clone(),
            laptop,
            bookshelf,
        ]))
        .with_categories(InMemoryStore::with_entities([
            furniture.clone(),
            electronics,
        ]))
        .with_details(InMemoryStore::with_entities(details))
        .build()
        .unwrap();

    Fixture {
        server: TestServer::new(router),
        furniture,
        desk,
        lamp,
    }
}

fn names(body: &Value) -> Vec<&str> {
    body["value"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_root_document_links_collections() {
    let f = fixture();

    let response = f.server.get("/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["href"], "http://localhost/");
    assert_eq!(body["assets"]["href"], "http://localhost/assets");
    assert_eq!(body["assets"]["rel"][0], "collection");
    assert_eq!(body["categories"]["href"], "http://localhost/categories");
}

#[tokio::test]
async fn test_health() {
    let f = fixture();
    let body: Value = f.server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_default_sort_and_envelope() {
    let f = fixture();

    let response = f.server.get("/assets").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        names(&body),
        vec!["Bookshelf", "Desk lamp", "Laptop", "Oak desk"]
    );
    assert_eq!(body["size"], 4);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["pageSize"], 25);
    assert_eq!(body["self"]["href"], "http://localhost/assets");
    assert_eq!(body["first"], body["self"]);
    assert!(body["previous"].is_null());
    assert!(body["next"].is_null());
    assert!(body["last"].is_null());
}

#[tokio::test]
async fn test_order_by_descending_puts_nulls_last() {
    let f = fixture();

    let body: Value = f
        .server
        .get("/assets")
        .add_query_param("orderBy", "value desc")
        .await
        .json();

    assert_eq!(
        names(&body),
        vec!["Laptop", "Oak desk", "Desk lamp", "Bookshelf"]
    );
    assert_eq!(
        body["self"]["href"],
        "http://localhost/assets?orderBy=value+desc"
    );
}

#[tokio::test]
async fn test_unknown_sort_field_falls_back_to_default() {
    let f = fixture();

    let body: Value = f
        .server
        .get("/assets")
        .add_query_param("orderBy", "colour desc")
        .await
        .json();

    assert_eq!(
        names(&body),
        vec!["Bookshelf", "Desk lamp", "Laptop", "Oak desk"]
    );
}

#[tokio::test]
async fn test_paging_links() {
    let f = fixture();

    let body: Value = f
        .server
        .get("/assets")
        .add_query_param("orderBy", "name")
        .add_query_param("offset", "1")
        .add_query_param("pageSize", "2")
        .await
        .json();

    assert_eq!(names(&body), vec!["Desk lamp", "Laptop"]);
    assert_eq!(body["size"], 4);
    assert_eq!(body["offset"], 1);
    assert_eq!(body["pageSize"], 2);
    assert_eq!(body["self"]["href"], "http://localhost/assets?orderBy=name");
    assert_eq!(body["previous"], body["self"]);
    assert_eq!(
        body["next"]["href"],
        "http://localhost/assets?orderBy=name&offset=3&pageSize=2"
    );
    assert_eq!(
        body["last"]["href"],
        "http://localhost/assets?orderBy=name&offset=2&pageSize=2"
    );
}

#[tokio::test]
async fn test_offset_past_the_end_points_previous_to_last() {
    let f = fixture();

    let body: Value = f
        .server
        .get("/assets")
        .add_query_param("offset", "50")
        .add_query_param("pageSize", "3")
        .await
        .json();

    assert!(body["value"].as_array().unwrap().is_empty());
    assert_eq!(body["size"], 4);
    assert!(body["next"].is_null());
    assert_eq!(
        body["last"]["href"],
        "http://localhost/assets?offset=3&pageSize=3"
    );
    assert_eq!(body["previous"], body["last"]);
}

#[tokio::test]
async fn test_search_rejection_fails_request() {
    let f = fixture();

    let response = f
        .server
        .get("/assets")
        .add_query_param("search", "value between 10")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_SEARCH_OPERATION");
    assert_eq!(body["details"]["field"], "value");
    assert_eq!(body["details"]["operator"], "between");
    assert!(body.get("value").is_none());
}

#[tokio::test]
async fn test_search_literal_of_wrong_type_is_rejected() {
    let f = fixture();

    let response = f
        .server
        .get("/assets")
        .add_query_param("search", "value gt expensive")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_multiple_search_terms_narrow() {
    let f = fixture();

    let one: Value = f
        .server
        .get("/assets")
        .add_query_param("search", "value gte 100")
        .await
        .json();
    assert_eq!(names(&one), vec!["Laptop", "Oak desk"]);

    let two: Value = f
        .server
        .get("/assets")
        .add_query_param("search", "value gte 100")
        .add_query_param("search", "name co DESK")
        .await
        .json();
    assert_eq!(names(&two), vec!["Oak desk"]);
    assert_eq!(two["size"], 1);
}

#[tokio::test]
async fn test_unknown_and_malformed_search_terms_are_ignored() {
    let f = fixture();

    let body: Value = f
        .server
        .get("/assets")
        .add_query_param("search", "colour eq red")
        .add_query_param("search", "name eq")
        .await
        .json();

    assert_eq!(body["size"], 4);
}

#[tokio::test]
async fn test_invalid_paging_is_rejected() {
    let f = fixture();

    for (key, value) in [("pageSize", "0"), ("pageSize", "lots"), ("offset", "10001")] {
        let response = f.server.get("/assets").add_query_param(key, value).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_PAGING", "{}={}", key, value);
        assert_eq!(body["details"]["fields"][0], key);
    }
}

#[tokio::test]
async fn test_unbounded_default_page_size() {
    let mut config = StashConfig::default_config();
    config.paging.default_page_size = None;
    let f = fixture_with(config);

    let body: Value = f.server.get("/assets").await.json();
    assert_eq!(body["size"], 4);
    assert!(body.get("pageSize").is_none());
    assert!(body["last"].is_null());
    assert_eq!(body["value"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_asset_with_embedded_details() {
    let f = fixture();

    let response = f.server.get(&format!("/assets/{}", f.desk.id)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["href"],
        format!("http://localhost/assets/{}", f.desk.id)
    );
    assert_eq!(body["name"], "Oak desk");
    assert_eq!(
        body["category"]["href"],
        format!("http://localhost/categories/{}", f.furniture.id)
    );
    assert!(body["parent"].is_null());
    assert_eq!(
        body["children"]["href"],
        format!("http://localhost/assets?search=parentId+eq+{}", f.desk.id)
    );

    let details = &body["detailItems"];
    assert_eq!(
        details["self"]["href"],
        format!("http://localhost/assets/{}/details", f.desk.id)
    );
    assert_eq!(names(details), vec!["depth", "finish", "width"]);
    assert_eq!(
        details["value"][0]["asset"]["href"],
        format!("http://localhost/assets/{}", f.desk.id)
    );
}

#[tokio::test]
async fn test_children_search_by_parent() {
    let f = fixture();

    let body: Value = f
        .server
        .get("/assets")
        .add_query_param("search", format!("parentId eq {}", f.desk.id))
        .await
        .json();

    assert_eq!(names(&body), vec!["Desk lamp"]);
}

#[tokio::test]
async fn test_asset_details_collection() {
    let f = fixture();

    let response = f
        .server
        .get(&format!("/assets/{}/details", f.desk.id))
        .add_query_param("search", "kind eq dimension")
        .add_query_param("orderBy", "name desc")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(names(&body), vec!["width", "depth"]);
    assert_eq!(body["size"], 2);

    let detail_href = body["value"][0]["href"].as_str().unwrap();
    let prefix = format!("http://localhost/assets/{}/details/", f.desk.id);
    assert!(detail_href.starts_with(&prefix));
}

#[tokio::test]
async fn test_single_detail_must_belong_to_asset() {
    let f = fixture();

    let details: Value = f
        .server
        .get(&format!("/assets/{}/details", f.lamp.id))
        .await
        .json();
    let detail_id = details["value"][0]["id"].as_str().unwrap().to_string();

    f.server
        .get(&format!("/assets/{}/details/{}", f.lamp.id, detail_id))
        .await
        .assert_status_ok();

    f.server
        .get(&format!("/assets/{}/details/{}", f.desk.id, detail_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_asset_is_not_found() {
    let f = fixture();

    let response = f.server.get(&format!("/assets/{}", Uuid::new_v4())).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
    assert!(body.get("href").is_none());

    f.server
        .get(&format!("/assets/{}/details", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories() {
    let f = fixture();

    let body: Value = f
        .server
        .get("/categories")
        .add_query_param("search", "name sw furn")
        .await
        .json();
    assert_eq!(names(&body), vec!["Furniture"]);

    let category = &body["value"][0];
    assert_eq!(
        category["href"],
        format!("http://localhost/categories/{}", f.furniture.id)
    );
    assert_eq!(
        category["assets"]["href"],
        format!(
            "http://localhost/assets?search=categoryId+eq+{}",
            f.furniture.id
        )
    );

    let assets: Value = f
        .server
        .get("/assets")
        .add_query_param("search", format!("categoryId eq {}", f.furniture.id))
        .await
        .json();
    assert_eq!(names(&assets), vec!["Bookshelf", "Oak desk"]);
}

#[tokio::test]
async fn test_single_category() {
    let f = fixture();

    let response = f
        .server
        .get(&format!("/categories/{}", f.furniture.id))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["name"], "Furniture");
    assert_eq!(
        body["href"],
        format!("http://localhost/categories/{}", f.furniture.id)
    );
}
