use crate::models::{parse_product_id, ProductInput, ProductResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

/// Body returned by the delete route, whether or not a record was removed.
pub const DELETE_CONFIRMATION: &str = "Delete Successfully!";

fn to_responses(products: Vec<crate::models::Product>) -> Json<Vec<ProductResponse>> {
    Json(products.into_iter().map(ProductResponse::from).collect())
}

/// Get all the products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Every stored product, in storage order", body = [ProductResponse]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.store.list_all().await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(to_responses(products))
}

/// Get products by exact name
#[utoipa::path(
    get,
    path = "/products/{product}",
    params(
        ("product" = String, Path, description = "Product name, matched exactly")
    ),
    responses(
        (status = 200, description = "Products with this name", body = [ProductResponse]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn find_products_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    lookup_by_name(&state, &name).await
}

/// `GET` on the create route's static path, which axum matches ahead of
/// `/products/:key`. Still a name lookup, for the literal name.
pub async fn find_products_named_addproduct(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    lookup_by_name(&state, "addproduct").await
}

async fn lookup_by_name(
    state: &AppState,
    name: &str,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.store.find_by_name(name).await?;
    tracing::debug!(product = %name, count = products.len(), "Looked up products by name");
    Ok(to_responses(products))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/products_id/{_id}",
    params(
        ("_id" = String, Path, description = "24-character hex ObjectId")
    ),
    responses(
        (status = 200, description = "Zero or one product", body = [ProductResponse]),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn find_product_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let id = parse_product_id(&raw_id)?;
    let products = state.store.find_by_id(id).await?;
    tracing::debug!(product_id = %id, result = ?products, "Looked up product by id");
    Ok(to_responses(products))
}

/// Add a new product
///
/// Echoes the submitted fields. The assigned id is not returned.
#[utoipa::path(
    post,
    path = "/products/addproduct",
    request_body = ProductInput,
    responses(
        (status = 200, description = "Added Successfully!", body = ProductInput),
        (status = 422, description = "Body is not a product"),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductInput>, AppError> {
    let id = state.store.insert(&input).await?;
    tracing::info!(product_id = %id, product = %input.product, "Product created");
    Ok(Json(input))
}

/// Update a product
///
/// Overwrites `product` and `price`. An id with no matching record is a
/// no-op and still echoes the payload.
#[utoipa::path(
    put,
    path = "/products/{_id}",
    params(
        ("_id" = String, Path, description = "24-character hex ObjectId")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Updated Successfully!", body = ProductInput),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductInput>, AppError> {
    let id = parse_product_id(&raw_id)?;
    let matched = state.store.update(id, &input).await?;
    tracing::info!(product_id = %id, matched, "Product update applied");
    Ok(Json(input))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{_id}",
    params(
        ("_id" = String, Path, description = "24-character hex ObjectId")
    ),
    responses(
        (status = 200, description = "Deleted Successfully!", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<&'static str, AppError> {
    let id = parse_product_id(&raw_id)?;
    let deleted = state.store.delete(id).await?;
    tracing::info!(product_id = %id, deleted, "Product delete applied");
    Ok(DELETE_CONFIRMATION)
}
