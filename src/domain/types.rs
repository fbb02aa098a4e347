// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::parsing::strip_0x;
use crate::domain::error::AppError;
use crate::infrastructure::data::token_manager::TokenInfo;
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::signers::local::PrivateKeySigner;
use std::fmt;
use std::str::FromStr;

/// A configured wallet. `index` is 1-based and only used for log context.
#[derive(Clone)]
pub struct Account {
    pub index: usize,
    pub signer: PrivateKeySigner,
}

impl Account {
    pub fn new(index: usize, signer: PrivateKeySigner) -> Self {
        Self { index, signer }
    }

    /// Parses a hex private key with or without `0x`. The error never echoes the key.
    pub fn from_key(index: usize, raw: &str) -> Result<Self, AppError> {
        let invalid = || AppError::Config(format!("Invalid private key #{index}"));
        let bytes = B256::from_str(strip_0x(raw.trim())).map_err(|_| invalid())?;
        let signer = PrivateKeySigner::from_bytes(&bytes).map_err(|_| invalid())?;
        Ok(Self::new(index, signer))
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// `0x12345678...abcdef` form used in log lines.
    pub fn short_address(&self) -> String {
        let full = format!("{:#x}", self.address());
        format!("{}...{}", &full[..10], &full[full.len() - 6..])
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("index", &self.index)
            .field("address", &self.address())
            .finish()
    }
}

/// Bearer token issued by the verification API for one wallet-cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Outbound proxy held by one wallet for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyBinding {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Transfer,
    Swap,
    Wrap,
    AddLiquidity,
}

impl OperationKind {
    /// Plan order within one wallet's cycle.
    pub const ORDERED: [OperationKind; 4] = [
        OperationKind::Transfer,
        OperationKind::Swap,
        OperationKind::Wrap,
        OperationKind::AddLiquidity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Transfer => "transfer",
            OperationKind::Swap => "swap",
            OperationKind::Wrap => "wrap",
            OperationKind::AddLiquidity => "add-liquidity",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One intended on-chain action. Amounts are in base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    Transfer {
        to: Address,
        amount: U256,
    },
    Swap {
        token_in: TokenInfo,
        token_out: TokenInfo,
        amount_in: U256,
        router: Address,
        recipient: Address,
    },
    Wrap {
        wrapped: Address,
        amount: U256,
    },
    AddLiquidity {
        token0: TokenInfo,
        token1: TokenInfo,
        amount0: U256,
        amount1: U256,
        fee: u32,
        position_manager: Address,
        recipient: Address,
    },
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Transfer { .. } => OperationKind::Transfer,
            OperationRequest::Swap { .. } => OperationKind::Swap,
            OperationRequest::Wrap { .. } => OperationKind::Wrap,
            OperationRequest::AddLiquidity { .. } => OperationKind::AddLiquidity,
        }
    }
}

/// Contract call ready for estimation or submission. `from` is implied by the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl CallRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            value: U256::ZERO,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// Fee fields as reported by the node right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeData {
    pub gas_price: u128,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPricing {
    Legacy {
        gas_price: u128,
    },
    Eip1559 {
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
    },
}

/// Gas limit and pricing for one submission. Built right before sending, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPlan {
    pub gas_limit: u64,
    pub pricing: GasPricing,
}

impl GasPlan {
    pub fn fixed(gas_limit: u64, fees: &FeeData) -> Self {
        let pricing = match (fees.max_fee_per_gas, fees.max_priority_fee_per_gas) {
            (Some(max_fee_per_gas), Some(max_priority_fee_per_gas)) => GasPricing::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            },
            _ => GasPricing::Legacy {
                gas_price: fees.gas_price,
            },
        };
        Self { gas_limit, pricing }
    }

    /// Scales an estimate by `multiplier_bps / 10_000`, rounding up.
    pub fn from_estimate(estimate: u64, multiplier_bps: u64, fees: &FeeData) -> Self {
        let scaled = (estimate as u128 * multiplier_bps as u128).div_ceil(10_000);
        Self::fixed(u64::try_from(scaled).unwrap_or(u64::MAX), fees)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

/// A broadcast transaction awaiting a terminal outcome.
#[derive(Debug, Clone)]
pub struct SubmittedTransaction {
    pub hash: B256,
    pub request: OperationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InsufficientBalance,
    PreconditionFailed,
    EstimationFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::InsufficientBalance => "insufficient balance",
            SkipReason::PreconditionFailed => "balance/approval precondition failed",
            SkipReason::EstimationFailed => "gas estimation failed",
        })
    }
}

/// Terminal result of one executor run. Executors never return errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Completed { hash: B256, verified: Option<bool> },
    Skipped(SkipReason),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eip1559_fees() -> FeeData {
        FeeData {
            gas_price: 7,
            max_fee_per_gas: Some(30),
            max_priority_fee_per_gas: Some(2),
        }
    }

    #[test]
    fn gas_plan_rounds_margin_up() {
        let plan = GasPlan::from_estimate(100_001, 12_000, &eip1559_fees());
        assert_eq!(plan.gas_limit, 120_002);
        let exact = GasPlan::from_estimate(50_000, 12_000, &eip1559_fees());
        assert_eq!(exact.gas_limit, 60_000);
    }

    #[test]
    fn gas_plan_prefers_eip1559_when_both_fields_present() {
        let plan = GasPlan::fixed(21_000, &eip1559_fees());
        assert_eq!(
            plan.pricing,
            GasPricing::Eip1559 {
                max_fee_per_gas: 30,
                max_priority_fee_per_gas: 2
            }
        );

        let legacy = GasPlan::fixed(
            21_000,
            &FeeData {
                gas_price: 7,
                max_fee_per_gas: Some(30),
                max_priority_fee_per_gas: None,
            },
        );
        assert_eq!(legacy.pricing, GasPricing::Legacy { gas_price: 7 });
    }

    #[test]
    fn account_keys_parse_with_or_without_prefix() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let plain = Account::from_key(1, key).expect("plain key");
        let prefixed = Account::from_key(2, &format!("0x{key}")).expect("prefixed key");
        assert_eq!(plain.address(), prefixed.address());
        assert_eq!(
            plain.short_address(),
            "0xf39fd6e5...b92266"
        );

        let err = Account::from_key(3, "0x1234").expect_err("short key");
        assert!(!err.to_string().contains("1234"));
        assert!(Account::from_key(4, &"00".repeat(32)).is_err());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("secret.jwt.value");
        assert_eq!(format!("{cred:?}"), "Credential(<redacted>)");
        assert_eq!(cred.bearer(), "Bearer secret.jwt.value");
    }

    #[test]
    fn plan_order_is_fixed() {
        assert_eq!(
            OperationKind::ORDERED,
            [
                OperationKind::Transfer,
                OperationKind::Swap,
                OperationKind::Wrap,
                OperationKind::AddLiquidity
            ]
        );
    }
}
