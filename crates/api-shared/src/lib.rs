//! # API Shared
//!
//! Wire types for the studio album API.
//!
//! Contains:
//! - Request and response bodies for the album endpoints (`albums` module)
//! - Shared services like `HealthService`
//!
//! Used by `studio-core` to shape results and by `api-rest` to serve and document them.

pub mod albums;
pub mod health;

pub use albums::*;
pub use health::{HealthRes, HealthService};

/// Error body returned with every 4xx response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
