// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::types::Account;
use crate::network::api::VerificationApi;
use crate::services::auth::SessionAuthenticator;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaucetOutcome {
    Claimed,
    NotAvailable { next_available: Option<DateTime<Utc>> },
    Failed(String),
}

/// Daily faucet claim. Authenticates on its own; the credential is not reused.
#[derive(Debug, Clone)]
pub struct FaucetClaimer {
    authenticator: SessionAuthenticator,
}

impl FaucetClaimer {
    pub fn new(authenticator: SessionAuthenticator) -> Self {
        Self { authenticator }
    }

    pub async fn claim(&self, account: &Account, api: &dyn VerificationApi) -> FaucetOutcome {
        let wallet = account.short_address();
        tracing::info!(target: "faucet", wallet = %wallet, "Checking faucet eligibility");

        let Some(credential) = self
            .authenticator
            .authenticate(account, api)
            .await
            .into_credential()
        else {
            tracing::error!(target: "faucet", wallet = %wallet, "No credential; skipping faucet");
            return FaucetOutcome::Failed("no credential".into());
        };

        let status = match api.faucet_status(account.address(), &credential).await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(target: "faucet", wallet = %wallet, error = %e, "Faucet status check failed");
                return FaucetOutcome::Failed(e.to_string());
            }
        };

        if !status.is_able_to_faucet {
            let next_available = DateTime::from_timestamp(status.available_at, 0);
            match next_available {
                Some(at) => tracing::warn!(
                    target: "faucet",
                    wallet = %wallet,
                    next_available = %at.format("%Y-%m-%d %H:%M:%S UTC"),
                    "Faucet not available yet"
                ),
                None => tracing::warn!(target: "faucet", wallet = %wallet, "Faucet not available"),
            }
            return FaucetOutcome::NotAvailable { next_available };
        }

        tracing::info!(target: "faucet", wallet = %wallet, "Faucet is available");
        match api.claim_faucet(account.address(), &credential).await {
            Ok(()) => {
                tracing::info!(target: "faucet", wallet = %wallet, "Faucet claimed");
                FaucetOutcome::Claimed
            }
            Err(e) => {
                tracing::error!(target: "faucet", wallet = %wallet, error = %e, "Faucet claim failed");
                FaucetOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use alloy::signers::local::PrivateKeySigner;
    use std::sync::atomic::Ordering;

    fn claimer() -> FaucetClaimer {
        FaucetClaimer::new(SessionAuthenticator::new("code"))
    }

    #[tokio::test]
    async fn unavailable_faucet_never_claims() {
        let api = MockApi::new();
        api.faucet_available.store(false, Ordering::SeqCst);
        let outcome = claimer()
            .claim(&Account::new(1, PrivateKeySigner::random()), &api)
            .await;
        assert_eq!(
            outcome,
            FaucetOutcome::NotAvailable {
                next_available: DateTime::from_timestamp(1_750_000_000, 0)
            }
        );
        assert_eq!(api.count("claim_faucet"), 0);
    }

    #[tokio::test]
    async fn available_faucet_claims_once() {
        let api = MockApi::new();
        let outcome = claimer()
            .claim(&Account::new(1, PrivateKeySigner::random()), &api)
            .await;
        assert_eq!(outcome, FaucetOutcome::Claimed);
        assert_eq!(api.count("claim_faucet"), 1);
        assert_eq!(api.count("login"), 1);
    }

    #[tokio::test]
    async fn login_failure_skips_status_check() {
        let api = MockApi::new();
        api.login_fails.store(true, Ordering::SeqCst);
        let outcome = claimer()
            .claim(&Account::new(1, PrivateKeySigner::random()), &api)
            .await;
        assert!(matches!(outcome, FaucetOutcome::Failed(_)));
        assert_eq!(api.count("faucet_status"), 0);
    }
}
