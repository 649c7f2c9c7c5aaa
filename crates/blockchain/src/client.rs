use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use shared::config::SolanaConfig;
use shared::WalletAddress;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::{RpcError, RpcResult};
use crate::retry::{retry_with_backoff, RetryConfig};
use crate::types::{JsonRpcResponse, RpcResponseContext, TokenAccountEntry};

/// SPL Token program; every listing is filtered to accounts it owns
pub const SPL_TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Anything that can list a wallet's SPL token accounts
#[async_trait]
pub trait TokenAccountSource: Send + Sync {
    /// Every token account owned by `owner`, in provider order.
    async fn get_token_accounts_by_owner(
        &self,
        owner: &WalletAddress,
    ) -> RpcResult<Vec<TokenAccountEntry>>;
}

/// JSON-RPC client for a Solana HTTP endpoint
pub struct SolanaRpcClient {
    http: Client,
    rpc_url: String,
    commitment: String,
    retry_config: RetryConfig,
    next_id: AtomicU64,
}

impl SolanaRpcClient {
    /// Create a client from the loaded Solana configuration
    pub fn new(config: &SolanaConfig) -> RpcResult<Self> {
        Self::new_with_retry(
            config.rpc_url.clone(),
            config.commitment.clone(),
            Duration::from_secs(config.request_timeout_secs),
            RetryConfig::with_max_attempts(config.max_attempts),
        )
    }

    /// Create a client with explicit timeout and retry settings
    pub fn new_with_retry(
        rpc_url: String,
        commitment: String,
        timeout: Duration,
        retry_config: RetryConfig,
    ) -> RpcResult<Self> {
        info!(
            "Initializing Solana RPC client (timeout {:?}, {} attempts)",
            timeout, retry_config.max_attempts
        );

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            rpc_url,
            commitment,
            retry_config,
            next_id: AtomicU64::new(1),
        })
    }

    fn token_accounts_request(&self, owner: &WalletAddress) -> serde_json::Value {
        json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": "getTokenAccountsByOwner",
            "params": [
                owner.as_str(),
                { "programId": SPL_TOKEN_PROGRAM_ID },
                { "encoding": "jsonParsed", "commitment": self.commitment }
            ]
        })
    }

    async fn post_token_accounts(
        &self,
        body: &serde_json::Value,
    ) -> RpcResult<Vec<TokenAccountEntry>> {
        let response = self.http.post(&self.rpc_url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("RPC endpoint returned HTTP {}", status);
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: JsonRpcResponse<RpcResponseContext<Vec<TokenAccountEntry>>> =
            response.json().await?;
        envelope.into_result().map(|context| context.value)
    }
}

#[async_trait]
impl TokenAccountSource for SolanaRpcClient {
    async fn get_token_accounts_by_owner(
        &self,
        owner: &WalletAddress,
    ) -> RpcResult<Vec<TokenAccountEntry>> {
        let label = owner.short_label();
        debug!("RPC getTokenAccountsByOwner for wallet {}", label);

        let body = self.token_accounts_request(owner);
        let started = Instant::now();

        let result = retry_with_backoff(
            "getTokenAccountsByOwner",
            &self.retry_config,
            RpcError::is_retryable,
            || self.post_token_accounts(&body),
        )
        .await;

        info!(
            "RPC response received in {} ms for wallet {}",
            started.elapsed().as_millis(),
            label
        );

        if let Ok(entries) = &result {
            debug!("Wallet {} owns {} token accounts", label, entries.len());
        }
        result
    }
}
