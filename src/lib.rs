pub mod auth;
pub mod dashboard;
pub mod errors;
pub mod expense;
pub mod extractors;
pub mod income;
pub mod openapi;
pub mod period;
pub mod reports;
pub mod responses;
pub mod user;
