//! Shared setup for product-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use product_service::config::{MongoConfig, ProductConfig, StorageBackend};
use product_service::services::InMemoryProductStore;
use product_service::{build_router, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_PUBLIC_URL: &str = "http://localhost:4000";

pub fn test_config(storage: StorageBackend) -> ProductConfig {
    ProductConfig {
        common: service_core::config::Config {
            port: 0,
            ..Default::default()
        },
        service_name: "product-service-test".to_string(),
        mongodb: MongoConfig {
            uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: "products_test".to_string(),
        },
        storage,
        public_url: TEST_PUBLIC_URL.to_string(),
    }
}

/// Router over an empty in-memory store. Clones share the same store.
pub fn memory_app() -> Router {
    build_router(AppState {
        config: test_config(StorageBackend::Memory),
        store: Arc::new(InMemoryProductStore::new()),
    })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not UTF-8")
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}
