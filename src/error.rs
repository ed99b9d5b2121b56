// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent client responses.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Application error type returned by every service operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable code for client branching.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "invalid_argument",
            AppError::Validation(_) => "validation_error",
            AppError::Fetch(_) => "fetch_error",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether the caller is at fault (not worth retrying).
    pub fn is_caller_error(&self) -> bool {
        matches!(self, AppError::InvalidArgument(_) | AppError::Validation(_))
    }
}

/// Reject a missing or blank user identifier before any remote call.
pub fn require_user_id(user_id: &str) -> Result<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidArgument("No user ID provided".to_string()));
    }
    Ok(trimmed)
}

/// Error body inside a [`ServiceResponse`].
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// `{ success, data, error }` envelope for UI callers that branch on a flag.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/lib/generated/")
)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> From<Result<T>> for ServiceResponse<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => {
                let details = match &err {
                    AppError::InvalidArgument(msg) | AppError::Fetch(msg) => Some(msg.clone()),
                    AppError::Validation(errors) => Some(errors.to_string()),
                    AppError::Database(msg) => {
                        tracing::error!(error = %msg, "Database error");
                        None
                    }
                    AppError::Internal(err) => {
                        tracing::error!(error = %err, "Internal error");
                        None
                    }
                };
                Self {
                    success: false,
                    data: None,
                    error: Some(ErrorBody {
                        error: err.code().to_string(),
                        details,
                    }),
                }
            }
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AppError>;
