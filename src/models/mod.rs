// src/models/mod.rs
pub mod transaction;

// Re-export commonly used types so other modules can use `crate::models::X`
pub use transaction::{ApiResponse, SupportedToken, WalletTransaction};
