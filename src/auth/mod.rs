pub mod handlers;
pub mod jwt;
pub mod models;
pub mod password;
pub mod service;

// Re-export handlers for route registration in main.rs
pub use handlers::{login, register, verify};

// Re-export for use in extractors
pub use jwt::decode_token;
