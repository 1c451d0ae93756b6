use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shape of every error body, as produced by `AppError`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid product id: 123")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "connection refused")]
    pub details: Option<String>,
}
