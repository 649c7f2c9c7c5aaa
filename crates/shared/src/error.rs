use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    #[error("No accounts provided")]
    NoAccountsProvided,

    #[error("No accounts found to close")]
    NoClosableAccounts,

    #[error("Solana RPC error: {0}")]
    SolanaRpc(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
