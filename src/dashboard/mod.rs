pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{expense_categories, monthly_trend, recent_transactions, summary};
