// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::constants::LOGIN_MESSAGE;
use crate::common::error::AppError;
use crate::domain::types::{Account, Credential};
use crate::network::api::VerificationApi;
use alloy::signers::SignerSync;

/// Credential lifecycle for one wallet-cycle. The login round trip is the
/// authenticating step; it always ends in `Authenticated` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    NoCredential,
    Authenticated(Credential),
    Failed(String),
}

impl AuthState {
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            AuthState::Authenticated(cred) => Some(cred),
            _ => None,
        }
    }

    pub fn into_credential(self) -> Option<Credential> {
        match self {
            AuthState::Authenticated(cred) => Some(cred),
            _ => None,
        }
    }
}

/// EIP-191 signature over the fixed login message, `0x`-prefixed hex.
pub fn sign_login_message(account: &Account) -> Result<String, AppError> {
    let sig = account
        .signer
        .sign_message_sync(LOGIN_MESSAGE.as_bytes())
        .map_err(|e| AppError::Signing(format!("login message: {e}")))?;
    Ok(format!("0x{}", hex::encode(sig.as_bytes())))
}

#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    invite_code: String,
}

impl SessionAuthenticator {
    pub fn new(invite_code: impl Into<String>) -> Self {
        Self {
            invite_code: invite_code.into(),
        }
    }

    /// Login, then the daily check-in. A failed check-in keeps the credential.
    pub async fn authenticate(&self, account: &Account, api: &dyn VerificationApi) -> AuthState {
        tracing::info!(target: "auth", wallet = %account.short_address(), "Logging in");
        let credential = match self.login(account, api).await {
            Ok(cred) => cred,
            Err(e) => {
                tracing::error!(target: "auth", wallet = %account.short_address(), error = %e, "Login failed");
                if e.is_credential_rejected() {
                    tracing::error!(target: "auth", "Received 403 Forbidden; the credential is invalid or expired");
                }
                return AuthState::Failed(e.to_string());
            }
        };
        tracing::info!(target: "auth", wallet = %account.short_address(), "Login successful, credential obtained");

        match api.check_in(account.address(), &credential).await {
            Ok(()) => {
                tracing::info!(target: "auth", wallet = %account.short_address(), "Daily check-in successful");
            }
            Err(e) => {
                tracing::warn!(
                    target: "auth",
                    wallet = %account.short_address(),
                    error = %e,
                    "Check-in failed, possibly already checked in"
                );
            }
        }
        AuthState::Authenticated(credential)
    }

    async fn login(
        &self,
        account: &Account,
        api: &dyn VerificationApi,
    ) -> Result<Credential, AppError> {
        let signature = sign_login_message(account)?;
        api.login(account.address(), &signature, &self.invite_code)
            .await
    }
}
