//! DTOs for health check endpoint.

use serde::Serialize;

/// Overall health: `healthy` when every check passed, `degraded` otherwise.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub click_queue: CheckStatus,
    /// Informational; weak-only mode does not fail the check.
    pub codegen: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    /// `ok`, `warn` or `error`.
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
