//! Error types for gs-viewer crates.

use thiserror::Error;

/// Result type alias using GsError.
pub type GsResult<T> = Result<T, GsError>;

/// Primary error type for GeoServer client operations.
#[derive(Debug, Error)]
pub enum GsError {
    // === Capability / metadata errors ===
    #[error("Failed to fetch capabilities: {0}")]
    CapabilitiesFetch(String),

    #[error("Failed to parse capabilities document: {0}")]
    CapabilitiesParse(String),

    #[error("DescribeFeatureType failed for '{type_name}': {message}")]
    DescribeFeatureType { type_name: String, message: String },

    // === Feature query errors ===
    #[error("Feature request failed: {0}")]
    FeatureFetch(String),

    #[error("Invalid feature document: {0}")]
    FeatureParse(String),

    // === Parameter errors ===
    #[error("Invalid BBOX: {0}")]
    InvalidBbox(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    // === Infrastructure errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

// Conversion from common error types
impl From<std::io::Error> for GsError {
    fn from(err: std::io::Error) -> Self {
        GsError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for GsError {
    fn from(err: serde_json::Error) -> Self {
        GsError::FeatureParse(format!("JSON error: {}", err))
    }
}
