use super::{ProductDb, ProductError};
use crate::models::{Product, ProductInput};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

/// Storage operations behind the product routes.
///
/// Each call maps to exactly one storage round trip. Updates and deletes
/// report how many records they touched, but a miss is not an error.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// Exact, case-sensitive match on the `product` field.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, ProductError>;

    /// Zero or one record.
    async fn find_by_id(&self, id: ObjectId) -> Result<Vec<Product>, ProductError>;

    /// Returns the id assigned by storage.
    async fn insert(&self, input: &ProductInput) -> Result<ObjectId, ProductError>;

    /// Overwrites `product` and `price`; returns the matched count.
    async fn update(&self, id: ObjectId, input: &ProductInput) -> Result<u64, ProductError>;

    /// Returns the deleted count.
    async fn delete(&self, id: ObjectId) -> Result<u64, ProductError>;

    async fn health_check(&self) -> Result<(), ProductError>;
}

#[derive(Clone)]
pub struct MongoProductStore {
    db: ProductDb,
}

impl MongoProductStore {
    pub fn new(db: ProductDb) -> Self {
        Self { db }
    }

    async fn find(&self, filter: Document) -> Result<Vec<Product>, ProductError> {
        let cursor = self.db.products().find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        self.find(doc! {}).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, ProductError> {
        self.find(doc! { "product": name }).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Vec<Product>, ProductError> {
        self.find(doc! { "_id": id }).await
    }

    async fn insert(&self, input: &ProductInput) -> Result<ObjectId, ProductError> {
        let document = input.to_document()?;
        let result = self
            .db
            .products()
            .clone_with_type::<Document>()
            .insert_one(document, None)
            .await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            ProductError::Internal(format!(
                "storage assigned a non-ObjectId id: {}",
                result.inserted_id
            ))
        })
    }

    async fn update(&self, id: ObjectId, input: &ProductInput) -> Result<u64, ProductError> {
        let fields = input.to_document()?;
        let result = self
            .db
            .products()
            .update_one(doc! { "_id": id }, doc! { "$set": fields }, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, ProductError> {
        let result = self
            .db
            .products()
            .delete_one(doc! { "_id": id }, None)
            .await?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), ProductError> {
        Ok(self.db.health_check().await?)
    }
}
