use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Message returned for every upstream failure; the detail stays in the logs
pub const NETWORK_ERROR_MESSAGE: &str = "Error connecting to the network";

/// Error type for the HTTP layer
#[derive(Debug)]
pub enum ApiError {
    // Validation errors
    InvalidAddress(String),
    ValidationError(String),

    // User-facing conditions
    NoAccountsProvided,
    NoClosableAccounts,

    // External API errors
    UpstreamRpcError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::NoAccountsProvided => write!(f, "No accounts provided"),
            ApiError::NoClosableAccounts => write!(f, "No accounts found to close"),
            ApiError::UpstreamRpcError(msg) => write!(f, "Upstream RPC error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidAddress(_)
            | ApiError::ValidationError(_)
            | ApiError::NoAccountsProvided
            | ApiError::NoClosableAccounts => StatusCode::BAD_REQUEST,
            ApiError::UpstreamRpcError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message) = match &self {
            ApiError::InvalidAddress(_) => {
                ("invalid_address", "ERROR: 400 - Invalid address".to_string())
            }
            ApiError::ValidationError(msg) => ("validation_error", msg.clone()),
            ApiError::NoAccountsProvided => {
                ("no_accounts_provided", "No accounts provided".to_string())
            }
            ApiError::NoClosableAccounts => {
                ("no_closable_accounts", "No accounts found to close".to_string())
            }
            ApiError::UpstreamRpcError(msg) => {
                error!("Upstream RPC error: {}", msg);
                ("upstream_rpc_error", NETWORK_ERROR_MESSAGE.to_string())
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::InvalidWalletAddress(msg) => ApiError::InvalidAddress(msg),
            shared::Error::NoAccountsProvided => ApiError::NoAccountsProvided,
            shared::Error::NoClosableAccounts => ApiError::NoClosableAccounts,
            shared::Error::Validation(msg) => ApiError::ValidationError(msg),
            shared::Error::SolanaRpc(msg) => ApiError::UpstreamRpcError(msg),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
