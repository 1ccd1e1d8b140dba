use serde::{Deserialize, Serialize};

use crate::models::domain::{FavoriteEntry, FilterSpec, TenderRecord};

/// Response for the search and awards endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    pub filters: FilterSpec,
    pub tenders: Vec<TenderRecord>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub tenders_loaded: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Outcome of an add or remove on the favorites store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteActionResponse {
    pub success: bool,
}

/// Favorites listing for one identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteListResponse {
    pub success: bool,
    pub favorites: Vec<FavoriteEntry>,
}

/// Body returned with 401 on the favorites endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthFailureResponse {
    pub success: bool,
    pub error: String,
}
