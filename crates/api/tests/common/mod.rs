#![allow(dead_code)]

use async_trait::async_trait;
use blockchain::{RpcError, RpcResult, TokenAccountEntry, TokenAccountSource};
use serde_json::{json, Value};
use shared::WalletAddress;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const WALLET: &str = "Fg6PaFpoGXkYsidMpWTK7yiARNTKT6fYH6YbG6s6g5a8";

/// What the fake provider answers with
#[derive(Debug, Clone)]
pub enum Scripted {
    Accounts(Vec<Value>),
    JsonRpcError { code: i64, message: String },
    HttpStatus(u16),
    Timeout,
}

/// `TokenAccountSource` that replays a canned answer and counts calls
pub struct ScriptedSource {
    answer: Scripted,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(answer: Scripted) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn accounts(entries: Vec<Value>) -> Self {
        Self::new(Scripted::Accounts(entries))
    }

    pub fn rpc_error(message: &str) -> Self {
        Self::new(Scripted::JsonRpcError {
            code: -32002,
            message: message.to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenAccountSource for ScriptedSource {
    async fn get_token_accounts_by_owner(
        &self,
        _owner: &WalletAddress,
    ) -> RpcResult<Vec<TokenAccountEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Scripted::Accounts(entries) => {
                Ok(entries.iter().cloned().map(TokenAccountEntry).collect())
            }
            Scripted::JsonRpcError { code, message } => Err(RpcError::JsonRpc {
                code: *code,
                message: message.clone(),
                data: None,
            }),
            Scripted::HttpStatus(status) => Err(RpcError::HttpStatus {
                status: *status,
                body: "upstream exploded: api-key=do-not-leak".to_string(),
            }),
            Scripted::Timeout => Err(RpcError::Timeout("operation timed out".to_string())),
        }
    }
}

/// A `jsonParsed` token account entry as returned by `getTokenAccountsByOwner`
pub fn token_account(pubkey: &str, mint: &str, ui_amount: f64, decimals: u8) -> Value {
    json!({
        "pubkey": pubkey,
        "account": {
            "data": {
                "parsed": {
                    "info": {
                        "isNative": false,
                        "mint": mint,
                        "owner": WALLET,
                        "state": "initialized",
                        "tokenAmount": {
                            "amount": "0",
                            "decimals": decimals,
                            "uiAmount": ui_amount,
                            "uiAmountString": ui_amount.to_string()
                        }
                    },
                    "type": "account"
                },
                "program": "spl-token",
                "space": 165
            },
            "executable": false,
            "lamports": 2039280,
            "owner": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "rentEpoch": 0
        }
    })
}

/// Entries `acct-0..acct-n` with the given amounts, all 2 decimals
pub fn accounts_with_amounts(amounts: &[f64]) -> Vec<Value> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| token_account(&format!("acct-{}", i), &format!("mint-{}", i), *amount, 2))
        .collect()
}

/// An entry missing its parsed token data
pub fn malformed_account(pubkey: &str) -> Value {
    json!({
        "pubkey": pubkey,
        "account": {"data": ["AAAA", "base64"], "lamports": 2039280}
    })
}
