//! On-disk encoding of the product collection.
//!
//! The file is a pretty-printed JSON array. Product field names are matched
//! case-insensitively on read (`Id`, `ImageUrl` and `imageurl` all decode),
//! specification keys are kept verbatim.

use models::Product;
use serde_json::{Map, Value};

use crate::errors::ServiceError;

const FIELDS: [&str; 7] = ["id", "name", "price", "description", "rating", "imageUrl", "specifications"];
const NULLABLE: [&str; 3] = ["description", "imageUrl", "specifications"];

/// Decode a snapshot. Blank content and a bare `null` mean an empty store.
pub fn decode(bytes: &[u8]) -> Result<Vec<Product>, ServiceError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_slice(bytes).map_err(ServiceError::corrupt)?;
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        _ => return Err(ServiceError::corrupt("expected a JSON array of products")),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => serde_json::from_value(Value::Object(canonical_keys(map)))
                .map_err(|e| ServiceError::corrupt(format!("product #{idx}: {e}"))),
            _ => Err(ServiceError::corrupt(format!("product #{idx}: expected an object"))),
        })
        .collect()
}

pub fn encode(products: &[Product]) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec_pretty(products).map_err(ServiceError::storage)
}

fn canonical_keys(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(key, value)| {
            let key = FIELDS
                .iter()
                .find(|f| f.eq_ignore_ascii_case(&key))
                .map(|f| f.to_string())
                .unwrap_or(key);
            // null on an optional field falls back to its default
            if value.is_null() && NULLABLE.contains(&key.as_str()) {
                return None;
            }
            Some((key, value))
        })
        .collect()
}
