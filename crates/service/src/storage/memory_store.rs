//! In-memory product store for tests and ephemeral use.

use async_trait::async_trait;
use models::Product;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::product_store::{apply_update, next_id, remove_by_id, ProductStore};

/// Same identity and mutation rules as the file store, kept in a `Vec`
/// behind a `RwLock`. Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an existing snapshot; ids are taken as given.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.read().await.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn add(&self, mut product: Product) -> Result<Product, ServiceError> {
        let mut products = self.products.write().await;
        product.id = next_id(&products)?;
        products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Option<Product>, ServiceError> {
        Ok(apply_update(&mut *self.products.write().await, product))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(remove_by_id(&mut *self.products.write().await, id))
    }
}
