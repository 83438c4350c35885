#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the population dashboard server.
//!
//! Figures and control options are serialized straight from the dashboard
//! crate; this crate holds the HTTP-only envelope types.

use serde::{Deserialize, Serialize};

/// Query parameters for the figures endpoint. Omitted values fall back to
/// the dataset defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiguresQueryParams {
    /// District label, or `Zurich` for all districts.
    pub district: Option<String>,
    /// Range start (`YYYY-MM-DD`, inclusive).
    pub from: Option<String>,
    /// Range end (`YYYY-MM-DD`, inclusive).
    pub to: Option<String>,
    /// Age distribution year.
    pub year: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of population records loaded.
    pub record_count: usize,
}

/// Error body returned with 4xx/5xx responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable description.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
