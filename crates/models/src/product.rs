use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::ValidationFailed;

/// Catalog entry as persisted by the product store.
///
/// `id` is owned by the store: it is assigned on insert and never changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

/// Create/update payload. Every field is lenient on decode so that a missing
/// or `null` value surfaces as a rule violation instead of a deserialization
/// failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: f64,
    #[serde(default)]
    #[validate(length(max = 2000, message = "imageUrl must be at most 2000 characters"))]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(required(message = "Specifications cannot be null"))]
    pub specifications: Option<BTreeMap<String, String>>,
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price > Decimal::ZERO {
        return Ok(());
    }
    let mut err = ValidationError::new("price");
    err.message = Some("price must be greater than 0".into());
    Err(err)
}

impl ProductInput {
    /// Run the field rules and return every violation at once.
    pub fn check(&self) -> Result<(), ValidationFailed> {
        self.validate().map_err(ValidationFailed::from)?;
        // `range` lets NaN through.
        if self.rating.is_nan() {
            return Err(ValidationFailed {
                violations: vec![crate::Violation {
                    field: "rating".into(),
                    message: "rating must be between 0 and 5".into(),
                }],
            });
        }
        Ok(())
    }

    /// Validate and build the entity. `id` is a placeholder on create; the
    /// store overwrites it.
    pub fn into_product(self, id: i64) -> Result<Product, ValidationFailed> {
        self.check()?;
        Ok(Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            rating: self.rating,
            image_url: self.image_url,
            specifications: self.specifications.unwrap_or_default(),
        })
    }
}

impl From<Product> for ProductInput {
    fn from(p: Product) -> Self {
        Self {
            id: Some(p.id),
            name: p.name,
            price: p.price,
            description: p.description,
            rating: p.rating,
            image_url: p.image_url,
            specifications: Some(p.specifications),
        }
    }
}
