// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use crate::common::retry::{BackoffSchedule, backoff_delay};
use crate::domain::types::ReceiptSummary;
use crate::network::chain::ChainClient;
use alloy::primitives::B256;

/// Bounded receipt lookup with deterministic doubling backoff.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationPoller {
    schedule: BackoffSchedule,
}

impl ConfirmationPoller {
    pub fn new(schedule: BackoffSchedule) -> Self {
        Self { schedule }
    }

    /// Looks the receipt up at most `max_retries` times, sleeping `base * 2^n` after
    /// each miss. "Not indexed yet" errors count as a miss; any other error aborts.
    pub async fn wait_for_receipt(
        &self,
        chain: &dyn ChainClient,
        hash: B256,
    ) -> Result<ReceiptSummary, AppError> {
        for attempt in 0..self.schedule.max_retries {
            match chain.transaction_receipt(hash).await {
                Ok(Some(receipt)) => {
                    tracing::debug!(
                        target: "receipt",
                        hash = %hash,
                        attempt,
                        block = ?receipt.block_number,
                        "Receipt found"
                    );
                    return Ok(receipt);
                }
                Ok(None) => {}
                Err(e) if e.is_not_indexed() => {
                    tracing::debug!(target: "receipt", hash = %hash, attempt, "Transaction not indexed yet");
                }
                Err(e) => {
                    tracing::warn!(target: "receipt", hash = %hash, attempt, error = %e, "Receipt lookup failed");
                    return Err(e);
                }
            }

            let delay = backoff_delay(self.schedule.base, attempt);
            tracing::debug!(
                target: "receipt",
                hash = %hash,
                attempt = attempt + 1,
                max_retries = self.schedule.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Receipt not available, backing off"
            );
            tokio::time::sleep(delay).await;
        }

        Err(AppError::ReceiptTimeout {
            hash: hash.to_string(),
            retries: self.schedule.max_retries,
        })
    }
}
