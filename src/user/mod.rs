pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{change_password, delete_account, get_profile, update_profile};
