pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    http::{header, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, DOCS_PATH,
    OPENAPI_PATH, REQUEST_ID_HEADER,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{openapi::Server, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ProductConfig;
use crate::services::ProductStore;

#[derive(OpenApi)]
#[openapi(
    info(title = "Product API Using MongoDB", version = "1.0.0"),
    paths(
        handlers::home::index,
        handlers::products::list_products,
        handlers::products::find_products_by_name,
        handlers::products::find_product_by_id,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::ProductInput,
            models::ProductResponse,
            dtos::ErrorResponse,
        )
    ),
    tags(
        (name = "Home", description = "Landing page"),
        (name = "Products", description = "Create, read, update and delete products"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with `public_url` as its only server.
pub fn api_doc(public_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(public_url)]);
    doc
}

/// Request-scoped context. The store is built once at startup and shared.
#[derive(Clone)]
pub struct AppState {
    pub config: ProductConfig,
    pub store: Arc<dyn ProductStore>,
}

pub fn build_router(state: AppState) -> Router {
    // One route entry for `/products/:key`: name lookup on GET, id-keyed writes otherwise.
    let products = Router::new()
        .route("/products", get(handlers::list_products))
        .route(
            "/products/addproduct",
            get(handlers::find_products_named_addproduct).post(handlers::create_product),
        )
        .route(
            "/products/:key",
            get(handlers::find_products_by_name)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/products_id/:id", get(handlers::find_product_by_id));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .merge(products)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, api_doc(&state.config.public_url)))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
}
