use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    pub message: String,
    pub cleared: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Natural language question about NFL data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NflQuery {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NflQueryResponse {
    pub query: String,
    pub answer: String,
    pub data_sources: Vec<String>,
}
