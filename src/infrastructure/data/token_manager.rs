// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use std::collections::HashMap;

use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::{Address, U256};

use crate::domain::constants::{USDC, USDT, WPHRS};
use crate::domain::error::AppError;

/// Token metadata needed for decimal-aware amounts and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: &str, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            address,
            decimals,
        }
    }

    pub fn format(&self, amount: U256) -> String {
        format_amount(amount, self.decimals)
    }
}

/// Symbol-keyed registry of the fixed testnet token set.
#[derive(Debug, Clone)]
pub struct TokenManager {
    tokens: HashMap<String, TokenInfo>,
}

impl TokenManager {
    pub fn pharos_testnet() -> Self {
        Self::from_entries([
            TokenInfo::new("USDC", USDC, 6),
            TokenInfo::new("USDT", USDT, 6),
            TokenInfo::new("WPHRS", WPHRS, 18),
        ])
    }

    pub fn from_entries(entries: impl IntoIterator<Item = TokenInfo>) -> Self {
        let tokens = entries
            .into_iter()
            .map(|info| (info.symbol.to_ascii_uppercase(), info))
            .collect();
        Self { tokens }
    }

    pub fn info(&self, symbol: &str) -> Result<&TokenInfo, AppError> {
        self.tokens
            .get(&symbol.to_ascii_uppercase())
            .ok_or_else(|| AppError::Validation {
                field: "token".into(),
                message: format!("unknown token symbol {symbol}"),
            })
    }

}

impl Default for TokenManager {
    fn default() -> Self {
        Self::pharos_testnet()
    }
}

/// Decimal string (e.g. `"0.0001"`) to base units.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, AppError> {
    parse_units(amount, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|e| AppError::Validation {
            field: "amount".into(),
            message: format!("cannot scale {amount} to {decimals} decimals: {e}"),
        })
}

pub fn format_amount(amount: U256, decimals: u8) -> String {
    format_units(amount, decimals).unwrap_or_else(|_| amount.to_string())
}
