//! Storage abstractions for the service layer
//!
//! `ProductStore` is the seam; `JsonFileProductStore` persists the whole
//! catalog as one JSON array, `InMemoryProductStore` backs tests.

pub mod codec;
pub mod json_file_store;
pub mod memory_store;
pub mod product_store;

pub use json_file_store::JsonFileProductStore;
pub use memory_store::InMemoryProductStore;
pub use product_store::ProductStore;
