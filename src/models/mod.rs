pub mod cache;
pub mod resource;
pub mod schemas;

pub use cache::{CacheStats, CacheStore};
pub use resource::{Resource, ResourceKind};
