// SolanaRpcClient against a local JSON-RPC endpoint

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use blockchain::{RetryConfig, RpcError, SolanaRpcClient, TokenAccountSource};
use serde_json::{json, Value};
use shared::config::{SolanaConfig, DEFAULT_RPC_MAX_ATTEMPTS};
use shared::WalletAddress;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const WALLET: &str = "Fg6PaFpoGXkYsidMpWTK7yiARNTKT6fYH6YbG6s6g5a8";

/// Replays `replies` in order; the last one repeats
#[derive(Clone)]
struct CannedRpc {
    replies: Arc<Vec<(StatusCode, Value)>>,
    hits: Arc<AtomicUsize>,
}

async fn answer(
    State(rpc): State<CannedRpc>,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let hit = rpc.hits.fetch_add(1, Ordering::SeqCst);

    if request["method"] != "getTokenAccountsByOwner" || request["params"][0] != WALLET {
        return (StatusCode::BAD_REQUEST, Json(json!({"unexpected": request})));
    }

    let (status, body) = &rpc.replies[hit.min(rpc.replies.len() - 1)];
    (*status, Json(body.clone()))
}

async fn serve(replies: Vec<(StatusCode, Value)>) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = CannedRpc {
        replies: Arc::new(replies),
        hits: hits.clone(),
    };
    let app = Router::new().route("/", post(answer)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

fn client(url: String, max_attempts: u32) -> SolanaRpcClient {
    SolanaRpcClient::new_with_retry(
        url,
        "confirmed".to_string(),
        Duration::from_secs(5),
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        },
    )
    .unwrap()
}

fn owner() -> WalletAddress {
    WalletAddress::parse(WALLET).unwrap()
}

fn success_body() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "context": {"slot": 250_000_000u64},
            "value": [{
                "pubkey": "A",
                "account": {
                    "data": {
                        "parsed": {
                            "info": {
                                "mint": "M",
                                "owner": WALLET,
                                "state": "initialized",
                                "tokenAmount": {
                                    "amount": "1",
                                    "decimals": 0,
                                    "uiAmount": 1.0,
                                    "uiAmountString": "1"
                                }
                            },
                            "type": "account"
                        },
                        "program": "spl-token",
                        "space": 165
                    },
                    "lamports": 2039280
                }
            }]
        }
    })
}

fn server_error() -> (StatusCode, Value) {
    (StatusCode::BAD_GATEWAY, json!({"error": "bad gateway"}))
}

#[tokio::test]
async fn test_result_value_is_decoded() {
    let (url, hits) = serve(vec![(StatusCode::OK, success_body())]).await;

    let entries = client(url, 3).get_token_accounts_by_owner(&owner()).await.unwrap();

    assert_eq!(entries.len(), 1);
    let record = entries[0].parse().unwrap();
    assert_eq!(record.address, "A");
    assert_eq!(record.mint_address, "M");
    assert_eq!(record.ui_amount, 1.0);
    assert_eq!(record.decimals, 0);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_json_rpc_error_body_is_already_processed() {
    let (url, hits) = serve(vec![(
        StatusCode::OK,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32002, "message": "Transaction simulation failed: Transaction already processed"}
        }),
    )])
    .await;

    let err = client(url, 3)
        .get_token_accounts_by_owner(&owner())
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::JsonRpc { code: -32002, .. }), "got {:?}", err);
    assert!(err.is_already_processed());
    // provider rejections are never retried
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bad_gateway_then_success_is_retried() {
    let (url, hits) = serve(vec![server_error(), (StatusCode::OK, success_body())]).await;

    let entries = client(url, 3).get_token_accounts_by_owner(&owner()).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_persistent_bad_gateway_uses_every_attempt() {
    let (url, hits) = serve(vec![server_error()]).await;

    let err = client(url, 3)
        .get_token_accounts_by_owner(&owner())
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::HttpStatus { status: 502, .. }), "got {:?}", err);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_rate_limited_then_success_is_retried() {
    let (url, hits) = serve(vec![
        (StatusCode::TOO_MANY_REQUESTS, json!({"error": "slow down"})),
        (StatusCode::OK, success_body()),
    ])
    .await;

    let result = client(url, 3).get_token_accounts_by_owner(&owner()).await;

    assert!(result.is_ok());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_client_error_status_is_not_retried() {
    let (url, hits) = serve(vec![(StatusCode::UNAUTHORIZED, json!({"error": "bad api key"}))]).await;

    let err = client(url, 3)
        .get_token_accounts_by_owner(&owner())
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::HttpStatus { status: 401, .. }), "got {:?}", err);
    assert!(!err.is_already_processed());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_envelope_without_result_is_decode_error() {
    let (url, hits) = serve(vec![(StatusCode::OK, json!({"jsonrpc": "2.0", "id": 1}))]).await;

    let err = client(url, 3)
        .get_token_accounts_by_owner(&owner())
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::Decode(_)), "got {:?}", err);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_default_config_makes_one_upstream_call() {
    let (url, hits) = serve(vec![server_error(), (StatusCode::OK, success_body())]).await;

    let config = SolanaConfig {
        rpc_url: url,
        commitment: "confirmed".to_string(),
        request_timeout_secs: 5,
        max_attempts: DEFAULT_RPC_MAX_ATTEMPTS,
    };
    let err = SolanaRpcClient::new(&config)
        .unwrap()
        .get_token_accounts_by_owner(&owner())
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::HttpStatus { status: 502, .. }), "got {:?}", err);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
