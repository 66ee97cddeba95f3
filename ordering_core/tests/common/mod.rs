//! Shared harness for API integration tests. Each test builds its own
//! app over fresh in-memory stores, so no state bleeds across tests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ordering_core::api::{routes, state::ApiState};

pub struct TestApp {
    router: Router,
}

pub fn app() -> TestApp {
    TestApp {
        router: routes::router(ApiState::in_memory()),
    }
}

impl TestApp {
    /// Send one request and return (status, parsed JSON body). An
    /// empty body (204) parses as `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, data: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(json!({ "data": data })))
            .await
    }

    pub async fn put(&self, uri: &str, data: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(json!({ "data": data })))
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

/// A valid dish payload for create/update requests.
pub fn dish_payload() -> Value {
    json!({
        "name": "Margherita",
        "description": "Tomato, mozzarella, basil",
        "price": 9,
        "image_url": "https://example.com/margherita.png",
    })
}

/// A valid order payload for create/update requests.
pub fn order_payload() -> Value {
    json!({
        "deliverTo": "221B Baker Street",
        "mobileNumber": "555-0100",
        "dishes": [{ "dishId": "dish-1", "quantity": 2 }],
    })
}
