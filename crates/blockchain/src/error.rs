use serde_json::Value;
use thiserror::Error;

/// Substrings providers use when a submission was already applied.
///
/// There is no documented JSON-RPC error code for this condition, so the
/// match is on the error text. Keep this list in one place.
const ALREADY_PROCESSED_MARKERS: &[&str] = &["Transaction already processed", "already been processed"];

/// Failure talking to the upstream JSON-RPC endpoint
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl RpcError {
    /// True when the provider reports that the work was already done.
    ///
    /// Callers absorb this as a successful no-op so that duplicate or
    /// retried submissions do not surface as failures.
    pub fn is_already_processed(&self) -> bool {
        match self {
            RpcError::JsonRpc { message, data, .. } => {
                let data_text = data.as_ref().map(Value::to_string).unwrap_or_default();
                ALREADY_PROCESSED_MARKERS
                    .iter()
                    .any(|marker| message.contains(marker) || data_text.contains(marker))
            }
            _ => false,
        }
    }

    /// Only transport-level failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            RpcError::Transport(_) | RpcError::Timeout(_) => true,
            RpcError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            RpcError::JsonRpc { .. } | RpcError::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RpcError::Timeout(err.to_string())
        } else if err.is_decode() {
            RpcError::Decode(err.to_string())
        } else {
            RpcError::Transport(err.to_string())
        }
    }
}

impl From<RpcError> for shared::Error {
    fn from(err: RpcError) -> Self {
        shared::Error::SolanaRpc(err.to_string())
    }
}

pub type RpcResult<T> = std::result::Result<T, RpcError>;
