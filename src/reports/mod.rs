pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{period_report, yearly_report};
