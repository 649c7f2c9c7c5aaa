pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::{SolanaRpcClient, TokenAccountSource, SPL_TOKEN_PROGRAM_ID};
pub use error::{RpcError, RpcResult};
pub use retry::{retry_with_backoff, RetryConfig};
pub use types::*;
