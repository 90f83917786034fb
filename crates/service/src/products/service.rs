use std::sync::Arc;

use models::Product;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::storage::ProductStore;

/// Application service for the catalog. Holds only the store; absence is
/// surfaced as `ServiceError::NotFound` so callers have to handle it.
pub struct ProductService<S: ProductStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ProductStore + ?Sized> ProductService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self.store.list_all().await?;
        debug!(count = products.len(), "list products");
        Ok(products)
    }

    /// Fetch one product.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::products::ProductService;
    /// use service::storage::InMemoryProductStore;
    /// use service::errors::ServiceError;
    /// let svc = ProductService::new(Arc::new(InMemoryProductStore::new()));
    /// let res = tokio_test::block_on(svc.get_product(7));
    /// assert!(matches!(res, Err(ServiceError::NotFound(7))));
    /// ```
    pub async fn get_product(&self, id: i64) -> Result<Product, ServiceError> {
        self.store.get_by_id(id).await?.ok_or(ServiceError::NotFound(id))
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: Product) -> Result<Product, ServiceError> {
        let created = self.store.add(product).await?;
        info!(id = created.id, "product_created");
        Ok(created)
    }

    #[instrument(skip(self, product), fields(id = product.id))]
    pub async fn update_product(&self, product: Product) -> Result<Product, ServiceError> {
        let id = product.id;
        let updated = self.store.update(product).await?.ok_or(ServiceError::NotFound(id))?;
        info!("product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        info!("product_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::product_store::fixtures::{mouse, product};
    use crate::storage::InMemoryProductStore;

    fn service(seed: Vec<Product>) -> ProductService<dyn ProductStore> {
        let store: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::with_products(seed));
        ProductService::new(store)
    }

    #[tokio::test]
    async fn empty_catalog_lists_without_error() {
        let svc = service(vec![]);
        assert!(svc.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let svc = service(vec![product(1, "a")]);
        assert_eq!(svc.get_product(1).await.unwrap().name, "a");
        assert!(matches!(svc.get_product(2).await, Err(ServiceError::NotFound(2))));
    }

    #[tokio::test]
    async fn crud_through_service() {
        let svc = service(vec![]);
        let created = svc.add_product(mouse()).await.unwrap();
        assert_eq!(created.id, 1);

        let mut changed = created.clone();
        changed.rating = 3.9;
        assert_eq!(svc.update_product(changed.clone()).await.unwrap(), changed);
        assert_eq!(svc.get_product(1).await.unwrap(), changed);

        svc.delete_product(1).await.unwrap();
        assert!(svc.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_surface_not_found() {
        let svc = service(vec![product(1, "a")]);
        assert!(matches!(svc.update_product(product(5, "ghost")).await, Err(ServiceError::NotFound(5))));
        assert!(matches!(svc.delete_product(5).await, Err(ServiceError::NotFound(5))));
        assert_eq!(svc.list_products().await.unwrap(), vec![product(1, "a")]);
    }
}
