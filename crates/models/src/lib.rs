//! Catalog domain models shared by the service and server crates.
//! - `product`: the persisted entity and the create/update payload.
//! - `errors`: the structured validation outcome.

pub mod errors;
pub mod product;

pub use errors::{ValidationFailed, Violation};
pub use product::{Product, ProductInput};
