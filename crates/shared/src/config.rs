use serde::Deserialize;
use std::env;

/// Per-call timeout for the upstream RPC request
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
/// One outbound call per request unless retries are opted into
pub const DEFAULT_RPC_MAX_ATTEMPTS: u32 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub solana: SolanaConfig,
    pub server: ServerConfig,
    pub inventory: InventoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolanaConfig {
    pub rpc_url: String,
    pub commitment: String,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every non-API path
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Accounts per page on the listing endpoint (default: 10)
    pub per_page: usize,
    /// Estimated SOL refunded per closed account (default: 0.002)
    pub rent_per_account_sol: f64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            rent_per_account_sol: 0.002,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = Config {
            solana: SolanaConfig {
                rpc_url: env::var("SOLANA_RPC_URL")
                    .map_err(|_| anyhow::anyhow!("SOLANA_RPC_URL must be set"))?,
                commitment: env::var("SOLANA_COMMITMENT")
                    .unwrap_or_else(|_| "confirmed".to_string()),
                request_timeout_secs: env::var("SOLANA_RPC_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_RPC_TIMEOUT_SECS.to_string())
                    .parse()?,
                max_attempts: env::var("SOLANA_RPC_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| DEFAULT_RPC_MAX_ATTEMPTS.to_string())
                    .parse()?,
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()?,
                static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "frontend".to_string()),
            },
            inventory: InventoryConfig {
                per_page: env::var("INVENTORY_PER_PAGE")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
                rent_per_account_sol: env::var("CLOSE_RENT_ESTIMATE_SOL")
                    .unwrap_or_else(|_| "0.002".to_string())
                    .parse()?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let url = &self.solana.rpc_url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            anyhow::bail!("SOLANA_RPC_URL must be an http(s) URL, got {}", url);
        }
        if self.solana.max_attempts == 0 {
            anyhow::bail!("SOLANA_RPC_MAX_ATTEMPTS must be at least 1");
        }
        if self.solana.request_timeout_secs == 0 {
            anyhow::bail!("SOLANA_RPC_TIMEOUT_SECS must be at least 1");
        }
        if self.inventory.per_page == 0 {
            anyhow::bail!("INVENTORY_PER_PAGE must be at least 1");
        }
        if !(self.inventory.rent_per_account_sol >= 0.0) {
            anyhow::bail!("CLOSE_RENT_ESTIMATE_SOL must be a non-negative number");
        }
        Ok(())
    }
}
