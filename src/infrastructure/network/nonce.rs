// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::network::provider::HttpProvider;
use alloy::primitives::Address;
use alloy::providers::Provider;
use std::sync::{Arc, Mutex};

/// Sequential nonce source for one account. Seeded from the pending count, then advanced locally.
#[derive(Clone)]
pub struct NonceManager {
    provider: HttpProvider,
    address: Address,
    next: Arc<Mutex<Option<u64>>>,
}

impl NonceManager {
    pub fn new(provider: HttpProvider, address: Address) -> Self {
        Self {
            provider,
            address,
            next: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the nonce to sign with and reserves it.
    pub async fn reserve(&self) -> Result<u64, AppError> {
        if let Some(cached) = self.peek() {
            self.store(cached.saturating_add(1));
            return Ok(cached);
        }

        let on_chain_nonce = self
            .provider
            .get_transaction_count(self.address)
            .pending()
            .await
            .map_err(|e| AppError::Connection(format!("Failed to fetch nonce: {}", e)))?;

        self.store(on_chain_nonce.saturating_add(1));
        Ok(on_chain_nonce)
    }

    /// Forget the local sequence; the next reservation re-reads the pending count.
    pub fn resync(&self) {
        tracing::debug!(target: "nonce", address = %self.address, "Nonce cache cleared");
        *self.next.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn peek(&self) -> Option<u64> {
        *self.next.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn store(&self, value: u64) {
        *self.next.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
    }
}
