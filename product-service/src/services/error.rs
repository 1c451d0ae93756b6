use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProductError {
    #[error("Invalid product id: {0}")]
    InvalidIdentifier(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Product cannot be stored: {0}")]
    Unencodable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Unencodable(err.to_string())
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidIdentifier(_) | ProductError::Unencodable(_) => {
                AppError::BadRequest(anyhow::anyhow!(err))
            }
            ProductError::Database(e) => AppError::from(e),
            ProductError::Internal(e) => AppError::InternalError(anyhow::anyhow!(e)),
        }
    }
}
