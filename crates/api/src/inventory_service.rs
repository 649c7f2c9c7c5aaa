use blockchain::{RpcResult, TokenAccountEntry, TokenAccountSource};
use shared::config::InventoryConfig;
use shared::{
    BatchResult, ClassifiedAccount, CloseEstimate, Error, InventoryPage, Result,
    TokenAccountRecord, ViewMode, WalletAddress,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of preparing a close-accounts batch
#[derive(Debug, Clone, PartialEq)]
pub enum CloseOutcome {
    Estimate(CloseEstimate),
    /// The provider reported the work as already done; treated as success
    AlreadyProcessed,
}

/// Lists a wallet's SPL token accounts for the cleanup and burn views
///
/// Every call is a single stateless request against the configured
/// [`TokenAccountSource`]; nothing is cached between calls.
pub struct InventoryService {
    source: Arc<dyn TokenAccountSource>,
    config: InventoryConfig,
}

impl InventoryService {
    pub fn new(source: Arc<dyn TokenAccountSource>, config: InventoryConfig) -> Self {
        Self { source, config }
    }

    /// Page size configured for the listing endpoint
    pub fn per_page(&self) -> usize {
        self.config.per_page
    }

    /// One page of the wallet's token accounts.
    ///
    /// The page window is cut from the unfiltered provider order, and
    /// `has_more` is computed against the unfiltered total. Burn mode then
    /// drops zero-balance accounts from the window, so a burn page can hold
    /// fewer than `per_page` records while `has_more` is still true.
    pub async fn list_token_accounts(
        &self,
        wallet: &str,
        page: usize,
        per_page: usize,
        mode: ViewMode,
    ) -> Result<InventoryPage> {
        let wallet = WalletAddress::parse(wallet)?;
        if page == 0 {
            return Err(Error::Validation("page must be at least 1".to_string()));
        }
        if per_page == 0 {
            return Err(Error::Validation("per_page must be at least 1".to_string()));
        }

        let label = wallet.short_label();
        let entries = match self.fetch(&wallet).await {
            Ok(entries) => entries,
            Err(e) if e.is_already_processed() => {
                info!("Listing for {} reported as already processed, returning empty page", label);
                Vec::new()
            }
            Err(e) => {
                warn!("Token account listing failed for {}", label);
                return Err(e.into());
            }
        };

        let total = entries.len();
        let window = page_window(total, page, per_page);
        let mut tokens = Vec::with_capacity(window.len());

        for entry in &entries[window] {
            let Some(record) = parse_or_skip(entry) else {
                continue;
            };
            if mode == ViewMode::Burn && record.ui_amount == 0.0 {
                continue;
            }
            tokens.push(ClassifiedAccount::from(record));
        }

        debug!(
            "Wallet {} page {}: {} of {} accounts shown ({:?} view)",
            label,
            page,
            tokens.len(),
            total,
            mode
        );

        Ok(InventoryPage {
            wallet: label,
            tokens,
            total_tokens: total,
            has_more: total > page.saturating_mul(per_page),
        })
    }

    /// Every account with a non-zero balance, plus the estimated refund.
    ///
    /// An "already processed" provider error is absorbed as
    /// [`CloseOutcome::AlreadyProcessed`].
    pub async fn prepare_close_estimate(&self, wallet: &str) -> Result<CloseOutcome> {
        let wallet = WalletAddress::parse(wallet)?;
        let label = wallet.short_label();

        let entries = match self.fetch(&wallet).await {
            Ok(entries) => entries,
            Err(e) if e.is_already_processed() => {
                info!("Close request for {} already processed, continuing as success", label);
                return Ok(CloseOutcome::AlreadyProcessed);
            }
            Err(e) => {
                warn!("Close estimate failed for {}", label);
                return Err(e.into());
            }
        };

        info!("Found {} token accounts for {}", entries.len(), label);

        let closable: Vec<String> = entries
            .iter()
            .filter_map(parse_or_skip)
            .filter(TokenAccountRecord::has_balance)
            .map(|record| record.address)
            .collect();

        if closable.is_empty() {
            return Err(Error::NoClosableAccounts);
        }

        Ok(CloseOutcome::Estimate(CloseEstimate::new(
            closable,
            self.config.rent_per_account_sol,
        )))
    }

    /// Accept a batch of account addresses.
    ///
    /// No transaction is built or sent: the result only echoes the count.
    pub fn submit_batch(&self, accounts: &[String]) -> Result<BatchResult> {
        if accounts.is_empty() {
            return Err(Error::NoAccountsProvided);
        }

        info!("Starting batch process for {} accounts", accounts.len());

        Ok(BatchResult {
            total: accounts.len(),
            processed: 0,
            failed: 0,
        })
    }

    async fn fetch(&self, wallet: &WalletAddress) -> RpcResult<Vec<TokenAccountEntry>> {
        self.source.get_token_accounts_by_owner(wallet).await
    }
}

/// Index range of `page` (1-based) within `total` items, clamped to bounds
pub fn page_window(total: usize, page: usize, per_page: usize) -> std::ops::Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);
    start..end
}

fn parse_or_skip(entry: &TokenAccountEntry) -> Option<TokenAccountRecord> {
    match entry.parse() {
        Ok(record) => Some(record),
        Err(reason) => {
            warn!(
                "Error processing account {}: {}",
                entry.pubkey().unwrap_or("<unknown>"),
                reason
            );
            None
        }
    }
}
