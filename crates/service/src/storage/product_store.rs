use async_trait::async_trait;
use models::Product;

use crate::errors::ServiceError;

/// Repository abstraction over the durable product collection.
///
/// Every call works on a fresh snapshot of the whole collection; mutations
/// rewrite it in full. `update` and `delete` never fail on a missing id, they
/// report it through their return value and leave the collection untouched.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products in stored order. An uninitialised store is empty.
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError>;
    /// Assign the next id (ignoring `product.id`), append and persist.
    async fn add(&self, product: Product) -> Result<Product, ServiceError>;
    /// Overwrite the mutable fields of the entry matching `product.id`.
    async fn update(&self, product: Product) -> Result<Option<Product>, ServiceError>;
    /// Remove the entry; `false` when nothing matched.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// `max(ids) + 1` over the snapshot, or 1 when it is empty.
pub fn next_id(products: &[Product]) -> Result<i64, ServiceError> {
    match products.iter().map(|p| p.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| ServiceError::storage("id space exhausted")),
    }
}

pub(crate) fn apply_update(products: &mut [Product], product: Product) -> Option<Product> {
    let existing = products.iter_mut().find(|p| p.id == product.id)?;
    existing.name = product.name;
    existing.price = product.price;
    existing.description = product.description;
    existing.rating = product.rating;
    existing.image_url = product.image_url;
    existing.specifications = product.specifications;
    Some(existing.clone())
}

pub(crate) fn remove_by_id(products: &mut Vec<Product>, id: i64) -> bool {
    match products.iter().position(|p| p.id == id) {
        Some(idx) => {
            products.remove(idx);
            true
        }
        None => false,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use models::Product;
    use rust_decimal::Decimal;

    pub fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Decimal::new(2599, 2),
            description: format!("{name} description"),
            rating: 4.5,
            image_url: None,
            specifications: BTreeMap::from([("Color".to_string(), "Black".to_string())]),
        }
    }

    pub fn mouse() -> Product {
        Product {
            id: 0,
            name: "Mouse".into(),
            price: Decimal::new(25, 0),
            description: String::new(),
            rating: 4.7,
            image_url: None,
            specifications: BTreeMap::from([("Type".to_string(), "Wireless".to_string())]),
        }
    }
}
