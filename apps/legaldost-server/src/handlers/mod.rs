//! HTTP handlers
//!
//! - `documents`: upload, list, fetch and delete
//! - `analysis`: analysis runs, chat, explanations and the rule table

pub mod analysis;
pub mod documents;

use axum::{http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Handler: GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "legaldost-server",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

const ENDPOINTS: &[(&str, &str)] = &[
    ("health", "GET /health"),
    ("upload", "POST /api/documents/upload"),
    ("documents", "GET /api/documents"),
    ("document", "GET /api/documents/:id"),
    ("deleteDocument", "DELETE /api/documents/:id"),
    ("analyze", "POST /api/analysis/analyze/:id"),
    ("chat", "POST /api/analysis/chat/:id"),
    ("chatHistory", "GET /api/analysis/chat/:id"),
    ("explain", "POST /api/analysis/explain"),
    ("rules", "GET /api/analysis/rules"),
];

fn endpoint_map() -> serde_json::Map<String, serde_json::Value> {
    ENDPOINTS
        .iter()
        .map(|(name, route)| (name.to_string(), json!(route)))
        .collect()
}

/// Handler: GET /api
pub async fn api_index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "LegalDost API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoint_map(),
    }))
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Route not found",
            "code": "ROUTE_NOT_FOUND",
            "availableEndpoints": endpoint_map(),
        })),
    )
}
