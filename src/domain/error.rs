// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

/// JSON-RPC code some nodes return while a freshly broadcast tx is not indexed yet.
pub const RPC_CODE_TX_NOT_INDEXED: i64 = -32008;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection failed to endpoint: {0}")]
    Connection(String),

    #[error("RPC error{}: {message}", .code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Rpc { code: Option<i64>, message: String },

    #[error("Transaction failed: {hash}, reason: {reason}")]
    Transaction { hash: String, reason: String },

    #[error("Failed to get transaction receipt for {hash} after {retries} retries")]
    ReceiptTimeout { hash: String, retries: u32 },

    #[error("External API error: {endpoint} responded with {status}")]
    ApiCall { endpoint: String, status: u16 },

    #[error("External API rejected {endpoint}: {msg}")]
    Api { endpoint: String, msg: String },

    #[error("Credential rejected by {endpoint} (403); token is invalid or expired")]
    CredentialRejected { endpoint: String },

    #[error("Validation failed for field {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl AppError {
    /// True for the provider error that means "receipt not indexed yet".
    pub fn is_not_indexed(&self) -> bool {
        matches!(self, AppError::Rpc { code: Some(RPC_CODE_TX_NOT_INDEXED), .. })
    }

    pub fn is_credential_rejected(&self) -> bool {
        matches!(self, AppError::CredentialRejected { .. })
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) => AppError::Rpc {
                code: Some(payload.code),
                message: payload.message.to_string(),
            },
            None => AppError::Connection(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_indexed_is_detected_by_code_only() {
        let pending = AppError::Rpc {
            code: Some(RPC_CODE_TX_NOT_INDEXED),
            message: "transaction not found".into(),
        };
        let other = AppError::Rpc {
            code: Some(-32000),
            message: "transaction not found".into(),
        };
        assert!(pending.is_not_indexed());
        assert!(!other.is_not_indexed());
        assert!(!AppError::Connection("timeout".into()).is_not_indexed());
    }

    #[test]
    fn receipt_timeout_names_hash_and_retries() {
        let err = AppError::ReceiptTimeout {
            hash: "0xabc".into(),
            retries: 5,
        };
        assert_eq!(
            err.to_string(),
            "Failed to get transaction receipt for 0xabc after 5 retries"
        );
    }

    #[test]
    fn rpc_error_display_includes_code_when_present() {
        let err = AppError::Rpc {
            code: Some(-32000),
            message: "nonce too low".into(),
        };
        assert_eq!(err.to_string(), "RPC error (-32000): nonce too low");
        let bare = AppError::Rpc {
            code: None,
            message: "boom".into(),
        };
        assert_eq!(bare.to_string(), "RPC error: boom");
    }
}
