use crate::services::ProductError;
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Any JSON number. Integers stay integers on the way in and out of storage.
pub type Price = serde_json::Number;

/// A product document as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product: String,
    pub price: Price,
}

impl Product {
    pub fn new(input: ProductInput) -> Self {
        Self {
            id: None,
            product: input.product,
            price: input.price,
        }
    }
}

/// Request body for create and update, echoed back on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "pen")]
    pub product: String,
    #[schema(value_type = f64, example = 10)]
    pub price: Price,
}

impl ProductInput {
    /// The stored form of these fields. Numbers BSON cannot hold (integers
    /// above `i64::MAX`) are rejected here, whichever store is in use.
    pub fn to_document(&self) -> Result<Document, ProductError> {
        Ok(mongodb::bson::to_document(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    #[schema(example = "65f1c0d2a3b4c5d6e7f80912")]
    pub id: String,
    #[schema(example = "pen")]
    pub product: String,
    #[schema(value_type = f64, example = 10)]
    pub price: Price,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            product: p.product,
            price: p.price,
        }
    }
}

/// Converts a path segment into a storage id.
pub fn parse_product_id(raw: &str) -> Result<ObjectId, ProductError> {
    ObjectId::parse_str(raw).map_err(|_| ProductError::InvalidIdentifier(raw.to_string()))
}
