pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{create_income, delete_income, get_income, list_incomes, update_income};
