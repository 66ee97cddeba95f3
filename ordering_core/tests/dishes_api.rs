//! Integration tests for the /dishes routes.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, dish_payload};

#[tokio::test]
async fn create_returns_the_created_dish() {
    let app = app();

    let (status, body) = app.post("/dishes", dish_payload()).await;
    assert_eq!(status, StatusCode::CREATED);

    let dish = &body["data"];
    assert!(!dish["id"].as_str().unwrap().is_empty());
    assert_eq!(dish["name"], "Margherita");
    assert_eq!(dish["price"], 9);
}

#[tokio::test]
async fn create_rejects_negative_price_without_storing() {
    let app = app();
    app.post("/dishes", dish_payload()).await;

    let mut payload = dish_payload();
    payload["price"] = json!(-5);
    let (status, body) = app.post("/dishes", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Dish must have a price that is an integer greater than 0"
    );

    let (_, list) = app.get("/dishes").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let app = app();

    let mut payload = dish_payload();
    payload.as_object_mut().unwrap().remove("name");
    let (status, body) = app.post("/dishes", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Dish must include a name");
}

#[tokio::test]
async fn create_rejects_wrong_typed_name_with_the_service_envelope() {
    let app = app();

    let mut payload = dish_payload();
    payload["name"] = json!(5);
    let (status, body) = app.post("/dishes", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Dish must include a name");
}

#[tokio::test]
async fn read_round_trips_the_created_dish() {
    let app = app();

    let (_, created) = app.post("/dishes", dish_payload()).await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, fetched) = app.get(&format!("/dishes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn read_unknown_dish_is_404() {
    let app = app();

    let (status, body) = app.get("/dishes/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dish does not exist: nope.");
}

#[tokio::test]
async fn update_overwrites_fields_and_keeps_the_id() {
    let app = app();
    let (_, created) = app.post("/dishes", dish_payload()).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let payload = json!({
        "name": "Quattro Formaggi",
        "description": "Four cheeses",
        "price": 12,
        "image_url": "https://example.com/quattro.png",
    });
    let (status, updated) = app.put(&format!("/dishes/{id}"), payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["id"], id.as_str());
    assert_eq!(updated["data"]["name"], "Quattro Formaggi");
    assert_eq!(updated["data"]["price"], 12);

    let (_, fetched) = app.get(&format!("/dishes/{id}")).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_with_mismatched_body_id_leaves_the_dish_unchanged() {
    let app = app();
    let (_, created) = app.post("/dishes", dish_payload()).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let mut payload = dish_payload();
    payload["id"] = json!("xyz");
    payload["name"] = json!("Impostor");
    let (status, body) = app.put(&format!("/dishes/{id}"), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!("Dish id does not match route id. Dish: xyz, Route: {id}")
    );

    let (_, fetched) = app.get(&format!("/dishes/{id}")).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_unknown_dish_is_404() {
    let app = app();

    let (status, _) = app.put("/dishes/nope", dish_payload()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn identical_updates_are_idempotent() {
    let app = app();
    let (_, created) = app.post("/dishes", dish_payload()).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let payload = json!({
        "name": "Diavola",
        "description": "Spicy salami",
        "price": 11,
        "image_url": "https://example.com/diavola.png",
    });
    let (_, first) = app.put(&format!("/dishes/{id}"), payload.clone()).await;
    let (_, second) = app.put(&format!("/dishes/{id}"), payload).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn list_returns_dishes_in_insertion_order() {
    let app = app();

    for name in ["First", "Second", "Third"] {
        let mut payload = dish_payload();
        payload["name"] = json!(name);
        app.post("/dishes", payload).await;
    }

    let (status, body) = app.get("/dishes").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn unsupported_verbs_are_405() {
    let app = app();
    let (_, created) = app.post("/dishes", dish_payload()).await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = app.request(Method::DELETE, "/dishes", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "DELETE not allowed for /dishes");

    let (status, body) = app
        .request(Method::DELETE, &format!("/dishes/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body["message"],
        format!("DELETE not allowed for /dishes/{id}")
    );
}
