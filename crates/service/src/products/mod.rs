//! Product access operations: one thin operation per use case over a
//! [`ProductStore`](crate::storage::ProductStore).

pub mod service;

pub use service::ProductService;
