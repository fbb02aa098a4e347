// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::parsing::{clean_secret, indexed_key_suffix, parse_boolish};
use crate::domain::constants;
use crate::domain::error::AppError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

const PRIVATE_KEY_ENV_PREFIX: &str = "PRIVATE_KEY_";

#[derive(Debug, Deserialize, Clone)]
pub struct GlobalSettings {
    // General
    #[serde(default = "default_false")]
    pub debug: bool,
    #[serde(default = "default_false")]
    pub log_json: bool,

    // Network
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_invite_code")]
    pub invite_code: String,
    #[serde(default = "default_proxies_path")]
    pub proxies_path: String,

    // Identity
    #[serde(default)]
    pub private_keys: Vec<String>,

    // Cycle plan
    #[serde(default = "default_delay_minutes")]
    pub delay_minutes: u64,
    #[serde(default = "default_operation_count")]
    pub num_transfers: u32,
    #[serde(default = "default_operation_count")]
    pub num_swaps: u32,
    #[serde(default = "default_operation_count")]
    pub num_wraps: u32,
    #[serde(default = "default_operation_count")]
    pub num_lps: u32,

    // Transaction
    #[serde(default = "default_receipt_max_retries")]
    pub receipt_max_retries: u32,
    #[serde(default = "default_receipt_base_delay_ms")]
    pub receipt_base_delay_ms: u64,
    #[serde(default = "default_gas_limit_multiplier_bps")]
    pub gas_limit_multiplier_bps: u64,
}

// Defaults
fn default_false() -> bool {
    false
}
fn default_rpc_url() -> String {
    constants::PHAROS_TESTNET_RPC_URL.to_string()
}
fn default_chain_id() -> u64 {
    constants::PHAROS_TESTNET_CHAIN_ID
}
fn default_api_base_url() -> String {
    constants::API_BASE_URL.to_string()
}
fn default_invite_code() -> String {
    constants::DEFAULT_INVITE_CODE.to_string()
}
fn default_proxies_path() -> String {
    constants::DEFAULT_PROXIES_PATH.to_string()
}
fn default_delay_minutes() -> u64 {
    30
}
fn default_operation_count() -> u32 {
    10
}
fn default_receipt_max_retries() -> u32 {
    constants::RECEIPT_MAX_RETRIES
}
fn default_receipt_base_delay_ms() -> u64 {
    constants::RECEIPT_BASE_DELAY_MS
}
fn default_gas_limit_multiplier_bps() -> u64 {
    constants::DEFAULT_GAS_LIMIT_MULTIPLIER_BPS
}

impl GlobalSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(selected_path) = path {
            builder = builder.add_source(File::from(Path::new(selected_path)).required(true));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }
        // Deterministic precedence: CLI (in main) > env/.env > config file.
        builder = builder.add_source(
            Environment::default()
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("private_keys"),
        );

        let mut settings: GlobalSettings = builder.build()?.try_deserialize()?;
        if let Some(debug) = env_bool("DEBUG") {
            settings.debug = debug;
        }
        Ok(settings)
    }

    /// Positive-integer checks for everything the cycle loop consumes.
    pub fn validate(&self) -> Result<(), AppError> {
        let positive = [
            ("delay_minutes", self.delay_minutes),
            ("num_transfers", u64::from(self.num_transfers)),
            ("num_swaps", u64::from(self.num_swaps)),
            ("num_wraps", u64::from(self.num_wraps)),
            ("num_lps", u64::from(self.num_lps)),
            ("receipt_max_retries", u64::from(self.receipt_max_retries)),
            ("receipt_base_delay_ms", self.receipt_base_delay_ms),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }
        if self.gas_limit_multiplier_bps < 10_000 {
            return Err(AppError::Validation {
                field: "gas_limit_multiplier_bps".to_string(),
                message: format!(
                    "{} would shrink the gas estimate (minimum 10000)",
                    self.gas_limit_multiplier_bps
                ),
            });
        }
        for (field, raw) in [("rpc_url", &self.rpc_url), ("api_base_url", &self.api_base_url)] {
            Url::parse(raw).map_err(|e| AppError::Validation {
                field: field.to_string(),
                message: format!("invalid URL {raw}: {e}"),
            })?;
        }
        Ok(())
    }

    /// Signing keys from `private_keys` followed by `PRIVATE_KEY_<n>` env vars in index order.
    pub fn private_keys_value(&self) -> Vec<String> {
        let mut indexed: Vec<(u32, String)> = std::env::vars()
            .filter_map(|(name, value)| {
                let idx = indexed_key_suffix(&name, PRIVATE_KEY_ENV_PREFIX)?;
                Some((idx, clean_secret(&value)?))
            })
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);

        let mut keys: Vec<String> = self
            .private_keys
            .iter()
            .filter_map(|k| clean_secret(k))
            .collect();
        for (_, key) in indexed {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    pub fn cycle_delay(&self) -> Duration {
        Duration::from_secs(self.delay_minutes.saturating_mul(60))
    }

    pub fn receipt_base_delay(&self) -> Duration {
        Duration::from_millis(self.receipt_base_delay_ms)
    }
}

fn env_bool(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    parse_boolish(&value)
}
