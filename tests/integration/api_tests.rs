//! API integration tests
//!
//! These run against a live server started separately:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_item_and_fetch_it() {
    let client = Client::new();

    let response = client
        .post(format!("{}/items", BASE_URL))
        .json(&json!({
            "category": "book",
            "args": ["The Rust Guide", "John Doe", "978-1234567890", 300]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_str().expect("No id in response");
    assert_eq!(body["category"], "book");

    let response = client
        .get(format!("{}/items/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_item_unknown_category() {
    let client = Client::new();

    let response = client
        .post(format!("{}/items", BASE_URL))
        .json(&json!({
            "category": "vinyl",
            "args": ["Some Record"]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_register_member() {
    let client = Client::new();

    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": "Alice Johnson",
            "email": "alice@email.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["member_id"].as_str().is_some());
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_flow() {
    let client = Client::new();

    let item: Value = client
        .post(format!("{}/items", BASE_URL))
        .json(&json!({
            "category": "dvd",
            "args": ["Rust Tutorial", "Jane Smith", 120, "Educational"]
        }))
        .send()
        .await
        .expect("Failed to create item")
        .json()
        .await
        .expect("Failed to parse item");

    let member: Value = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": "Bob Smith",
            "email": "bob@email.com"
        }))
        .send()
        .await
        .expect("Failed to create member")
        .json()
        .await
        .expect("Failed to parse member");

    let item_id = item["id"].as_str().expect("No item id");
    let member_id = member["member_id"].as_str().expect("No member id");

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "member_id": member_id, "item_id": item_id }))
        .send()
        .await
        .expect("Failed to borrow");
    assert_eq!(response.status(), 201);

    // A second borrow of the same item must conflict
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "member_id": member_id, "item_id": item_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .post(format!("{}/loans/return", BASE_URL))
        .json(&json!({ "member_id": member_id, "item_id": item_id }))
        .send()
        .await
        .expect("Failed to return");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["days_late"], 0);
}

#[tokio::test]
#[ignore]
async fn test_stats_endpoint() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["catalog"]["total_items"].is_number());
    assert!(body["circulation"]["active_loans"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_search_performance_comparison() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats/search-performance", BASE_URL))
        .query(&[("author", "John Doe")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["results_match"], true);
}
