use super::{ProductError, ProductStore};
use crate::models::{Product, ProductInput};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::{Mutex, MutexGuard};

/// Process-local product store with the same contract as the MongoDB one.
/// Records keep insertion order.
#[derive(Default)]
pub struct InMemoryProductStore {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Product>>, ProductError> {
        self.products
            .lock()
            .map_err(|e| ProductError::Internal(format!("product store mutex poisoned: {}", e)))
    }

    fn filter<F>(&self, pred: F) -> Result<Vec<Product>, ProductError>
    where
        F: Fn(&Product) -> bool,
    {
        Ok(self.lock()?.iter().filter(|p| pred(p)).cloned().collect())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        self.filter(|_| true)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, ProductError> {
        self.filter(|p| p.product == name)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Vec<Product>, ProductError> {
        self.filter(|p| p.id == Some(id))
    }

    async fn insert(&self, input: &ProductInput) -> Result<ObjectId, ProductError> {
        input.to_document()?;
        let id = ObjectId::new();
        let mut product = Product::new(input.clone());
        product.id = Some(id);
        self.lock()?.push(product);
        Ok(id)
    }

    async fn update(&self, id: ObjectId, input: &ProductInput) -> Result<u64, ProductError> {
        input.to_document()?;
        let mut products = self.lock()?;
        match products.iter_mut().find(|p| p.id == Some(id)) {
            Some(existing) => {
                existing.product = input.product.clone();
                existing.price = input.price.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, ProductError> {
        let mut products = self.lock()?;
        match products.iter().position(|p| p.id == Some(id)) {
            Some(index) => {
                products.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), ProductError> {
        self.lock().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;

    fn input(name: &str, price: u32) -> ProductInput {
        ProductInput {
            product: name.to_string(),
            price: Price::from(price),
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryProductStore::new();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn name_lookup_is_exact_and_case_sensitive() {
        let store = InMemoryProductStore::new();
        store.insert(&input("pen", 10)).await.unwrap();
        store.insert(&input("pen", 12)).await.unwrap();
        store.insert(&input("Pen", 11)).await.unwrap();
        store.insert(&input("pencil", 3)).await.unwrap();

        let pens = store.find_by_name("pen").await.unwrap();
        assert_eq!(pens.len(), 2);
        assert!(pens.iter().all(|p| p.product == "pen"));
    }

    #[tokio::test]
    async fn update_overwrites_both_fields() {
        let store = InMemoryProductStore::new();
        let id = store.insert(&input("pen", 10)).await.unwrap();

        let matched = store.update(id, &input("marker", 25)).await.unwrap();
        assert_eq!(matched, 1);

        let found = store.find_by_id(id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product, "marker");
        assert_eq!(found[0].price, Price::from(25u32));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_touch_nothing() {
        let store = InMemoryProductStore::new();
        store.insert(&input("pen", 10)).await.unwrap();
        let missing = ObjectId::new();

        assert_eq!(store.update(missing, &input("ghost", 1)).await.unwrap(), 0);
        assert_eq!(store.delete(missing).await.unwrap(), 0);

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].product, "pen");
    }

    #[tokio::test]
    async fn rejects_prices_mongodb_cannot_store() {
        let store = InMemoryProductStore::new();
        let id = store.insert(&input("pen", 10)).await.unwrap();
        let huge = ProductInput {
            product: "pen".to_string(),
            price: Price::from(u64::MAX),
        };

        assert!(matches!(
            store.insert(&huge).await,
            Err(ProductError::Unencodable(_))
        ));
        assert!(matches!(
            store.update(id, &huge).await,
            Err(ProductError::Unencodable(_))
        ));

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, Price::from(10u32));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = InMemoryProductStore::new();
        let id = store.insert(&input("pen", 10)).await.unwrap();

        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert!(store.find_by_id(id).await.unwrap().is_empty());
    }
}
