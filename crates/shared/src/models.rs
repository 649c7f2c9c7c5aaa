use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Shortest accepted wallet address, in characters
pub const MIN_WALLET_ADDRESS_LEN: usize = 32;
/// Longest accepted wallet address, in characters
pub const MAX_WALLET_ADDRESS_LEN: usize = 44;

// Wallet models

/// Base58-style public key submitted by the user.
///
/// Only the length is checked; the value is otherwise opaque and is handed
/// to the RPC provider as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Trim surrounding whitespace and enforce the 32..=44 character bound.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if !(MIN_WALLET_ADDRESS_LEN..=MAX_WALLET_ADDRESS_LEN).contains(&len) {
            return Err(Error::InvalidWalletAddress(format!(
                "expected {}-{} characters, got {}",
                MIN_WALLET_ADDRESS_LEN, MAX_WALLET_ADDRESS_LEN, len
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `abcd...wxyz` label used in responses and log lines.
    pub fn short_label(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which UI the listing is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Cleanup,
    Burn,
}

impl ViewMode {
    /// Anything other than `burn` is treated as the cleanup view.
    pub fn from_interface(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("burn") {
            ViewMode::Burn
        } else {
            ViewMode::Cleanup
        }
    }
}

// Token account models

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    EmptyTokenAccount,
    NftAccount,
    StandardTokenAccount,
}

impl Classification {
    pub fn of(ui_amount: f64, decimals: u8) -> Self {
        if ui_amount == 0.0 {
            Classification::EmptyTokenAccount
        } else if decimals == 0 && ui_amount == 1.0 {
            Classification::NftAccount
        } else {
            Classification::StandardTokenAccount
        }
    }
}

/// Snapshot of one SPL token account as reported by the RPC provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAccountRecord {
    pub address: String,
    #[serde(rename = "mint")]
    pub mint_address: String,
    #[serde(rename = "amount")]
    pub ui_amount: f64,
    pub decimals: u8,
}

impl TokenAccountRecord {
    pub fn classification(&self) -> Classification {
        Classification::of(self.ui_amount, self.decimals)
    }

    pub fn has_balance(&self) -> bool {
        self.ui_amount > 0.0
    }
}

/// A token account as returned to the browser, with its derived kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedAccount {
    #[serde(flatten)]
    pub record: TokenAccountRecord,
    pub kind: Classification,
}

impl From<TokenAccountRecord> for ClassifiedAccount {
    fn from(record: TokenAccountRecord) -> Self {
        let kind = record.classification();
        Self { record, kind }
    }
}

// Response models

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryPage {
    /// Shortened wallet label, never the full address
    pub wallet: String,
    pub tokens: Vec<ClassifiedAccount>,
    /// Unfiltered number of token accounts owned by the wallet
    pub total_tokens: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloseEstimate {
    pub accounts: Vec<String>,
    pub estimated_sol: f64,
}

impl CloseEstimate {
    pub fn new(accounts: Vec<String>, rent_per_account_sol: f64) -> Self {
        let estimated_sol = accounts.len() as f64 * rent_per_account_sol;
        Self {
            accounts,
            estimated_sol,
        }
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    /// Display form used by the UI, e.g. `0.006 SOL`.
    pub fn formatted_sol(&self) -> String {
        format!("{:.3} SOL", self.estimated_sol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
}
