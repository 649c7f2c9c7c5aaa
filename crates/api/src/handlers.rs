use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    response::IntoResponse,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use shared::{InventoryPage, ViewMode};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::inventory_service::CloseOutcome;
use crate::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct CheckWalletForm {
    #[serde(default)]
    pub wallet: String,
    /// `cleanup` or `burn`
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CloseAccountsForm {
    #[serde(default)]
    pub wallet: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchProcessRequest {
    #[serde(default)]
    pub accounts: Vec<String>,
}

// Response types

#[derive(Debug, Serialize)]
pub struct CloseAccountsResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_sol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_sol_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl From<CloseOutcome> for CloseAccountsResponse {
    fn from(outcome: CloseOutcome) -> Self {
        match outcome {
            CloseOutcome::Estimate(estimate) => Self {
                success: true,
                message: format!("Found {} accounts to close", estimate.count()),
                estimated_sol: Some(estimate.formatted_sol()),
                estimated_sol_value: Some(estimate.estimated_sol),
                accounts: Some(estimate.accounts),
                progress: None,
            },
            CloseOutcome::AlreadyProcessed => Self {
                success: true,
                message: "Transaction completed (already processed)".to_string(),
                accounts: None,
                estimated_sol: None,
                estimated_sol_value: None,
                progress: Some(100),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchProcessResponse {
    pub success: bool,
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `page` form field: absent or blank means the first page
fn parse_page(raw: Option<&str>) -> ApiResult<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| ApiError::ValidationError("page must be a positive integer".to_string())),
    }
}

// Handlers

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// List one page of a wallet's token accounts
pub async fn check_wallet(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CheckWalletForm>, FormRejection>,
) -> ApiResult<Json<InventoryPage>> {
    let Form(form) = form?;
    let page = parse_page(form.page.as_deref())?;
    let mode = form
        .interface
        .as_deref()
        .map(ViewMode::from_interface)
        .unwrap_or_default();

    let service = &state.inventory_service;
    let inventory = service
        .list_token_accounts(&form.wallet, page, service.per_page(), mode)
        .await?;

    Ok(Json(inventory))
}

/// Collect closable accounts and the estimated refund
pub async fn close_accounts(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CloseAccountsForm>, FormRejection>,
) -> ApiResult<Json<CloseAccountsResponse>> {
    let Form(form) = form?;
    let outcome = state
        .inventory_service
        .prepare_close_estimate(&form.wallet)
        .await?;

    Ok(Json(outcome.into()))
}

/// Accept a batch of account addresses for closing
pub async fn batch_process(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchProcessRequest>, JsonRejection>,
) -> ApiResult<Json<BatchProcessResponse>> {
    let Json(payload) = payload?;
    let result = state.inventory_service.submit_batch(&payload.accounts)?;

    Ok(Json(BatchProcessResponse {
        success: true,
        total: result.total,
        processed: result.processed,
        failed: result.failed,
        message: format!("Successfully processed {} accounts", result.processed),
    }))
}
