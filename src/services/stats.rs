// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::domain::types::{OperationKind, OperationOutcome, SkipReason};
use crate::services::faucet::FaucetOutcome;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct CycleStats {
    pub transfers: AtomicU64,
    pub swaps: AtomicU64,
    pub wraps: AtomicU64,
    pub liquidity_adds: AtomicU64,
    pub completed: AtomicU64,
    pub verified: AtomicU64,
    pub skipped: AtomicU64,
    pub failed: AtomicU64,
    pub skip_insufficient_balance: AtomicU64,
    pub skip_precondition: AtomicU64,
    pub skip_estimation: AtomicU64,
    pub faucet_claims: AtomicU64,
    pub wallets_failed: AtomicU64,
}

/// Plain copy of the counters for logging and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub attempts: u64,
    pub completed: u64,
    pub verified: u64,
    pub skipped: u64,
    pub failed: u64,
    pub faucet_claims: u64,
    pub wallets_failed: u64,
}

impl CycleStats {
    pub fn record(&self, kind: OperationKind, outcome: &OperationOutcome) {
        let attempts = match kind {
            OperationKind::Transfer => &self.transfers,
            OperationKind::Swap => &self.swaps,
            OperationKind::Wrap => &self.wraps,
            OperationKind::AddLiquidity => &self.liquidity_adds,
        };
        attempts.fetch_add(1, Ordering::Relaxed);

        match outcome {
            OperationOutcome::Completed { verified, .. } => {
                self.completed.fetch_add(1, Ordering::Relaxed);
                if *verified == Some(true) {
                    self.verified.fetch_add(1, Ordering::Relaxed);
                }
            }
            OperationOutcome::Skipped(reason) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
                let counter = match reason {
                    SkipReason::InsufficientBalance => &self.skip_insufficient_balance,
                    SkipReason::PreconditionFailed => &self.skip_precondition,
                    SkipReason::EstimationFailed => &self.skip_estimation,
                };
                counter.fetch_add(1, Ordering::Relaxed);
            }
            OperationOutcome::Failed(_) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn record_faucet(&self, outcome: &FaucetOutcome) {
        if *outcome == FaucetOutcome::Claimed {
            self.faucet_claims.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_wallet_failure(&self) {
        self.wallets_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self, kind: OperationKind) -> u64 {
        match kind {
            OperationKind::Transfer => self.transfers.load(Ordering::Relaxed),
            OperationKind::Swap => self.swaps.load(Ordering::Relaxed),
            OperationKind::Wrap => self.wraps.load(Ordering::Relaxed),
            OperationKind::AddLiquidity => self.liquidity_adds.load(Ordering::Relaxed),
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            attempts: OperationKind::ORDERED
                .iter()
                .map(|kind| self.attempts(*kind))
                .sum(),
            completed: self.completed.load(Ordering::Relaxed),
            verified: self.verified.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            faucet_claims: self.faucet_claims.load(Ordering::Relaxed),
            wallets_failed: self.wallets_failed.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self, cycle: u64) {
        let snap = self.snapshot();
        tracing::info!(
            target: "cycle",
            cycle,
            attempts = snap.attempts,
            completed = snap.completed,
            verified = snap.verified,
            skipped = snap.skipped,
            skip_balance = self.skip_insufficient_balance.load(Ordering::Relaxed),
            skip_precondition = self.skip_precondition.load(Ordering::Relaxed),
            skip_estimation = self.skip_estimation.load(Ordering::Relaxed),
            failed = snap.failed,
            faucet_claims = snap.faucet_claims,
            wallets_failed = snap.wallets_failed,
            "Cycle {cycle} finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;

    #[test]
    fn outcomes_are_tallied_per_kind_and_reason() {
        let stats = CycleStats::default();
        stats.record(
            OperationKind::Transfer,
            &OperationOutcome::Completed {
                hash: B256::ZERO,
                verified: Some(true),
            },
        );
        stats.record(
            OperationKind::Swap,
            &OperationOutcome::Skipped(SkipReason::PreconditionFailed),
        );
        stats.record(OperationKind::Swap, &OperationOutcome::Failed("x".into()));
        stats.record_faucet(&FaucetOutcome::Claimed);
        stats.record_faucet(&FaucetOutcome::NotAvailable {
            next_available: None,
        });

        assert_eq!(stats.attempts(OperationKind::Swap), 2);
        assert_eq!(stats.skip_precondition.load(Ordering::Relaxed), 1);
        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                attempts: 3,
                completed: 1,
                verified: 1,
                skipped: 1,
                failed: 1,
                faucet_claims: 1,
                wallets_failed: 0,
            }
        );
    }
}
