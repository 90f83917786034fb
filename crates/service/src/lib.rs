//! Service layer for the product catalog.
//! - `storage`: the product store seam with file-backed and in-memory implementations.
//! - `products`: the five catalog access operations.
//! - `auth`: single-credential login and JWT issuance.

pub mod auth;
pub mod errors;
pub mod products;
pub mod storage;
