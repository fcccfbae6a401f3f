pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;

// Re-export commonly used items
pub use error::{ApiError, Result};
pub use services::{NflQueryService, NflService};
