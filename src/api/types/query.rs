//! Request/response bodies for the query endpoint

use serde::{Deserialize, Serialize};

/// POST /query request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

/// POST /query response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}
