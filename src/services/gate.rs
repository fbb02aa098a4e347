// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::data::abi::IERC20;
use crate::domain::types::{CallRequest, GasPlan};
use crate::infrastructure::data::token_manager::TokenInfo;
use crate::network::chain::ChainClient;
use crate::services::confirmation::ConfirmationPoller;
use alloy::primitives::{Address, U256};
use alloy_sol_types::SolCall;
use dashmap::DashSet;
use std::sync::Arc;

/// Run-wide record of (owner, token, spender) triples that already hold a max approval.
#[derive(Debug, Clone, Default)]
pub struct ApprovalLedger {
    granted: Arc<DashSet<(Address, Address, Address)>>,
}

impl ApprovalLedger {
    pub fn contains(&self, owner: Address, token: Address, spender: Address) -> bool {
        self.granted.contains(&(owner, token, spender))
    }

    pub fn record(&self, owner: Address, token: Address, spender: Address) {
        self.granted.insert((owner, token, spender));
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

/// Balance and allowance check in front of every token-spending operation.
#[derive(Debug, Clone)]
pub struct PreconditionGate {
    poller: ConfirmationPoller,
    ledger: ApprovalLedger,
    gas_multiplier_bps: u64,
}

impl PreconditionGate {
    pub fn new(poller: ConfirmationPoller, ledger: ApprovalLedger, gas_multiplier_bps: u64) -> Self {
        Self {
            poller,
            ledger,
            gas_multiplier_bps,
        }
    }

    /// True when `owner` holds `amount` of `token` and `spender` may pull it.
    /// Approves `U256::MAX` when the allowance is short. Never errors.
    pub async fn ensure_funded(
        &self,
        chain: &dyn ChainClient,
        token: &TokenInfo,
        amount: U256,
        spender: Address,
    ) -> bool {
        match self.check(chain, token, amount, spender).await {
            Ok(ready) => ready,
            Err(e) => {
                tracing::error!(
                    target: "gate",
                    token = %token.symbol,
                    spender = %spender,
                    error = %e,
                    "Balance/approval check failed"
                );
                false
            }
        }
    }

    async fn check(
        &self,
        chain: &dyn ChainClient,
        token: &TokenInfo,
        amount: U256,
        spender: Address,
    ) -> Result<bool, AppError> {
        let owner = chain.address();
        let balance = chain.token_balance(token.address, owner).await?;
        if balance < amount {
            tracing::warn!(
                target: "gate",
                token = %token.symbol,
                required = %token.format(amount),
                available = %token.format(balance),
                "Insufficient {} balance",
                token.symbol
            );
            return Ok(false);
        }

        if self.ledger.contains(owner, token.address, spender) {
            return Ok(true);
        }

        let allowance = chain.allowance(token.address, owner, spender).await?;
        if allowance >= amount {
            return Ok(true);
        }

        tracing::info!(
            target: "gate",
            token = %token.symbol,
            spender = %spender,
            allowance = %token.format(allowance),
            "Approving {} for spender",
            token.symbol
        );
        let call = CallRequest::new(
            token.address,
            IERC20::approveCall {
                spender,
                amount: U256::MAX,
            }
            .abi_encode(),
        );
        let estimate = chain.estimate_gas(&call).await?;
        let fees = chain.fee_data().await?;
        let plan = GasPlan::from_estimate(estimate, self.gas_multiplier_bps, &fees);
        let hash = chain.send_transaction(&call, &plan).await?;
        // A lost approval leaves the cached nonce ahead of the chain.
        let receipt = self
            .poller
            .wait_for_receipt(chain, hash)
            .await
            .inspect_err(|_| chain.resync_nonce())?;
        if !receipt.success {
            return Err(AppError::Transaction {
                hash: hash.to_string(),
                reason: "approval reverted".into(),
            });
        }

        self.ledger.record(owner, token.address, spender);
        tracing::info!(target: "gate", token = %token.symbol, hash = %hash, "Approval confirmed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::{SWAP_ROUTER, USDC};
    use crate::common::retry::BackoffSchedule;
    use crate::test_support::{MockChain, ReceiptStep};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn gate() -> PreconditionGate {
        PreconditionGate::new(
            ConfirmationPoller::new(BackoffSchedule::new(Duration::from_millis(10), 3)),
            ApprovalLedger::default(),
            12_000,
        )
    }

    fn usdc() -> TokenInfo {
        TokenInfo::new("USDC", USDC, 6)
    }

    #[tokio::test]
    async fn short_balance_blocks_without_sending() {
        let chain = MockChain::funded();
        chain.set_token(USDC, U256::from(50u64));
        let ok = gate()
            .ensure_funded(&chain, &usdc(), U256::from(100u64), SWAP_ROUTER)
            .await;
        assert!(!ok);
        assert!(chain.sent_calls().is_empty());
        assert_eq!(chain.allowance_reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sufficient_allowance_needs_no_approval() {
        let chain = MockChain::funded();
        chain.set_allowance(USDC, SWAP_ROUTER, U256::from(100u64));
        assert!(
            gate()
                .ensure_funded(&chain, &usdc(), U256::from(100u64), SWAP_ROUTER)
                .await
        );
        assert_eq!(chain.approvals_sent(), 0);
    }

    #[tokio::test]
    async fn approval_is_granted_once_per_triple() {
        let chain = MockChain::funded();
        let gate = gate();
        for _ in 0..3 {
            assert!(
                gate.ensure_funded(&chain, &usdc(), U256::from(100u64), SWAP_ROUTER)
                    .await
            );
        }
        assert_eq!(chain.approvals_sent(), 1);
        assert_eq!(chain.allowance_reads.load(Ordering::SeqCst), 1);
        assert!(gate.ledger.contains(chain.address(), USDC, SWAP_ROUTER));
    }

    #[tokio::test]
    async fn reverted_approval_blocks_and_is_not_recorded() {
        let chain = MockChain::funded();
        chain.approvals_revert.store(true, Ordering::SeqCst);
        let gate = gate();
        let ok = gate
            .ensure_funded(&chain, &usdc(), U256::from(100u64), SWAP_ROUTER)
            .await;
        assert!(!ok);
        assert!(gate.ledger.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unconfirmed_approval_resyncs_nonce() {
        let chain = MockChain::funded();
        chain.script_receipts([ReceiptStep::Absent; 3]);
        let gate = gate();
        let ok = gate
            .ensure_funded(&chain, &usdc(), U256::from(100u64), SWAP_ROUTER)
            .await;
        assert!(!ok);
        assert_eq!(chain.approvals_sent(), 1);
        assert_eq!(chain.nonce_resyncs.load(Ordering::SeqCst), 1);
        assert!(gate.ledger.is_empty());
    }

    #[tokio::test]
    async fn approval_estimation_failure_blocks() {
        let chain = MockChain::funded();
        chain.estimate_fails.store(true, Ordering::SeqCst);
        let ok = gate()
            .ensure_funded(&chain, &usdc(), U256::from(100u64), SWAP_ROUTER)
            .await;
        assert!(!ok);
        assert!(chain.sent_calls().is_empty());
    }
}
