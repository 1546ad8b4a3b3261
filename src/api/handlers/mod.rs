//! HTTP request handlers.

pub mod habit_handler;
pub mod health_handler;

pub use habit_handler::habit_routes;
pub use health_handler::health_check;
