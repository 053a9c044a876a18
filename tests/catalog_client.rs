//! Integration tests for `CatalogClient`
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use chrono::Duration;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fakestore::cache::CacheManager;
use fakestore::catalog::{CatalogClient, CatalogError};

fn product_json(id: u64, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Product {}", id),
        "price": 22.3,
        "description": "Slim-fitting style",
        "category": category,
        "image": format!("https://fakestoreapi.com/img/{}.jpg", id),
        "rating": { "rate": 4.1, "count": 259 }
    })
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_products_returns_listing() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/products",
        json!([product_json(1, "men's clothing"), product_json(2, "electronics")]),
    )
    .await;

    let client = CatalogClient::with_base_url(server.uri());
    let products = client.fetch_products().await.expect("listing should load");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, Decimal::new(223, 1));
    assert_eq!(products[1].category, "electronics");
}

#[tokio::test]
async fn fetch_categories_returns_names() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/products/categories",
        json!(["electronics", "jewelery", "men's clothing", "women's clothing"]),
    )
    .await;

    let client = CatalogClient::with_base_url(server.uri());
    let categories = client.fetch_categories().await.unwrap();

    assert_eq!(categories.len(), 4);
    assert_eq!(categories[2], "men's clothing");
}

#[tokio::test]
async fn fetch_category_hits_encoded_path() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/products/category/men's%20clothing",
        json!([product_json(3, "men's clothing")]),
    )
    .await;

    let client = CatalogClient::with_base_url(server.uri());
    let products = client.fetch_category("men's clothing").await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 3);
}

#[tokio::test]
async fn fetch_product_returns_single_product() {
    let server = MockServer::start().await;
    mount_json(&server, "/products/7", product_json(7, "jewelery")).await;

    let client = CatalogClient::with_base_url(server.uri());
    let product = client.fetch_product(7).await.unwrap();

    assert_eq!(product.id, 7);
    assert_eq!(product.rating.map(|r| r.count), Some(259));
}

#[tokio::test]
async fn fetch_product_with_empty_body_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let result = client.fetch_product(999).await;

    assert!(matches!(result, Err(CatalogError::NotFound(999))), "got {:?}", result);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let result = client.fetch_products().await;

    assert!(matches!(result, Err(CatalogError::Status(503))), "got {:?}", result);
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let result = client.fetch_products().await;

    assert!(matches!(result, Err(CatalogError::Parse(_))), "got {:?}", result);
}

#[tokio::test]
async fn fresh_cache_entry_skips_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["electronics"])))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
    let client = CatalogClient::with_base_url(server.uri()).with_cache(cache, Duration::minutes(30));

    let first = client.fetch_categories().await.unwrap();
    let second = client.fetch_categories().await.unwrap();

    assert_eq!(first, second);
    // `expect(1)` is verified when the server drops
}

#[tokio::test]
async fn expired_cache_is_served_when_api_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
    cache
        .write("products/categories", &vec!["jewelery".to_string()], Duration::minutes(-5))
        .unwrap();

    let client = CatalogClient::with_base_url(server.uri()).with_cache(cache, Duration::minutes(30));
    let categories = client.fetch_categories().await.expect("stale data should be served");

    assert_eq!(categories, vec!["jewelery".to_string()]);
}

#[tokio::test]
async fn offline_mode_serves_expired_cache_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
    cache
        .write("products/categories", &vec!["electronics".to_string()], Duration::minutes(-5))
        .unwrap();

    let client = CatalogClient::with_base_url(server.uri())
        .with_cache(cache, Duration::minutes(30))
        .offline(true);

    assert_eq!(client.fetch_categories().await.unwrap(), vec!["electronics".to_string()]);
    assert!(matches!(
        client.fetch_products().await,
        Err(CatalogError::Offline(_))
    ));
}
