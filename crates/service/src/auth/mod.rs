//! Auth module: single-credential login and JWT issuance/verification.
//!
//! The credential check is a placeholder for a real credential store; the
//! token side is what the HTTP guard relies on.

pub mod domain;
pub mod errors;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::TokenService;
