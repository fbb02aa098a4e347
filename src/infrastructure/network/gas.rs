// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::common::error::AppError;
use crate::domain::constants::{FALLBACK_GAS_PRICE_WEI, FALLBACK_PRIORITY_FEE_WEI};
use crate::domain::types::FeeData;
use crate::network::provider::HttpProvider;
use alloy::providers::Provider;
use alloy::rpc::types::BlockNumberOrTag;

/// Reads current fee fields. No caching; every submission asks again.
#[derive(Clone)]
pub struct GasOracle {
    provider: HttpProvider,
}

impl GasOracle {
    pub fn new(provider: HttpProvider) -> Self {
        Self { provider }
    }

    pub async fn fee_data(&self) -> Result<FeeData, AppError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| AppError::Connection(format!("Latest block fetch failed: {}", e)))?;
        let base_fee = block.as_ref().and_then(|b| b.header.base_fee_per_gas);

        let gas_price = match self.provider.get_gas_price().await {
            Ok(price) => Some(price),
            Err(e) => {
                tracing::debug!(target: "gas", error = %e, "eth_gasPrice unavailable");
                None
            }
        };

        let priority_fee = if base_fee.is_some() {
            match self.provider.get_max_priority_fee_per_gas().await {
                Ok(tip) => Some(tip),
                Err(e) => {
                    tracing::debug!(target: "gas", error = %e, "eth_maxPriorityFeePerGas unavailable");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self::compose(gas_price, base_fee.map(u128::from), priority_fee))
    }

    /// Mirrors the common client rule: `max_fee = 2 * base_fee + tip` when the chain has a base fee.
    pub fn compose(
        gas_price: Option<u128>,
        base_fee: Option<u128>,
        priority_fee: Option<u128>,
    ) -> FeeData {
        let gas_price = gas_price.unwrap_or(FALLBACK_GAS_PRICE_WEI);
        match base_fee {
            Some(base) => {
                let tip = priority_fee.unwrap_or(FALLBACK_PRIORITY_FEE_WEI);
                FeeData {
                    gas_price,
                    max_fee_per_gas: Some(base.saturating_mul(2).saturating_add(tip)),
                    max_priority_fee_per_gas: Some(tip),
                }
            }
            None => FeeData {
                gas_price,
                max_fee_per_gas: None,
                max_priority_fee_per_gas: None,
            },
        }
    }
}
