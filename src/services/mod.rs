pub mod nfl_service;
pub mod query_service;

pub use nfl_service::NflService;
pub use query_service::NflQueryService;
