pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{create_expense, delete_expense, get_expense, list_expenses, update_expense};
