use crate::models::Product;
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

pub const PRODUCTS_COLLECTION: &str = "products";

/// Connection to the product database, opened once at startup and cloned
/// into request state. The driver client is internally pooled and shared.
#[derive(Clone)]
pub struct ProductDb {
    client: MongoClient,
    db: Database,
}

impl ProductDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for product-service");

        // Non-unique: duplicate product names are allowed.
        let name_index = IndexModel::builder()
            .keys(doc! { "product": 1 })
            .options(
                IndexOptions::builder()
                    .name("product_name_lookup".to_string())
                    .build(),
            )
            .build();

        self.products()
            .create_index(name_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create product name index: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on products.product");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(PRODUCTS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
