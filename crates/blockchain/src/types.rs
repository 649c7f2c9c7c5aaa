use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::TokenAccountRecord;

use crate::error::RpcError;

/// JSON-RPC 2.0 response envelope
///
/// `error` is kept untyped: providers are not consistent about its shape.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl<T> JsonRpcResponse<T> {
    pub fn into_result(self) -> Result<T, RpcError> {
        if let Some(error) = self.error {
            return Err(json_rpc_error(error));
        }
        self.result
            .ok_or_else(|| RpcError::Decode("response has neither result nor error".to_string()))
    }
}

fn json_rpc_error(error: Value) -> RpcError {
    let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    let data = error.get("data").cloned();
    RpcError::JsonRpc { code, message, data }
}

/// `{"context": {...}, "value": ...}` wrapper used by account queries
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponseContext<T> {
    pub value: T,
}

/// One element of `result.value` for `getTokenAccountsByOwner`
///
/// Entries are kept raw so that a single malformed entry can be skipped
/// without failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAccountEntry(pub Value);

#[derive(Debug, Deserialize)]
struct KeyedAccount {
    pubkey: String,
    account: AccountEnvelope,
}

#[derive(Debug, Deserialize)]
struct AccountEnvelope {
    data: ParsedAccountData,
}

#[derive(Debug, Deserialize)]
struct ParsedAccountData {
    parsed: ParsedAccount,
}

#[derive(Debug, Deserialize)]
struct ParsedAccount {
    info: TokenAccountInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAccountInfo {
    mint: String,
    token_amount: UiTokenAmount,
}

/// `tokenAmount` as rendered by the `jsonParsed` encoding
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTokenAmount {
    #[serde(default)]
    pub ui_amount: Option<f64>,
    #[serde(default)]
    pub ui_amount_string: Option<String>,
    pub decimals: u8,
}

impl UiTokenAmount {
    /// `uiAmount` can be null on some providers; fall back to the string form.
    pub fn resolve(&self) -> Option<f64> {
        self.ui_amount.or_else(|| {
            self.ui_amount_string
                .as_deref()
                .and_then(|s| s.parse::<f64>().ok())
        })
    }
}

impl TokenAccountEntry {
    /// Account address if present, for log lines about bad entries.
    pub fn pubkey(&self) -> Option<&str> {
        self.0.get("pubkey").and_then(Value::as_str)
    }

    pub fn parse(&self) -> Result<TokenAccountRecord, String> {
        let keyed: KeyedAccount = serde_json::from_value(self.0.clone())
            .map_err(|e| format!("unexpected account layout: {}", e))?;
        let info = keyed.account.data.parsed.info;
        let ui_amount = info
            .token_amount
            .resolve()
            .ok_or_else(|| format!("account {} has no uiAmount", keyed.pubkey))?;

        Ok(TokenAccountRecord {
            address: keyed.pubkey,
            mint_address: info.mint,
            ui_amount,
            decimals: info.token_amount.decimals,
        })
    }
}
