// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::common::constants::{
    LIQUIDITY_PAIRS, LiquidityOption, NATIVE_DECIMALS, POSITION_MANAGER, SWAP_PAIRS, SWAP_ROUTER,
    SwapPairOption, TRANSFER_AMOUNT, WPHRS, WRAP_MAX_MICROS, WRAP_MIN_MICROS,
};
use crate::common::error::AppError;
use crate::domain::types::{OperationKind, OperationRequest};
use crate::infrastructure::data::token_manager::{TokenManager, parse_amount};
use alloy::primitives::{Address, U256};
use rand::Rng;
use rand::seq::SliceRandom;

/// Micro-native (6 decimals) to wei.
const MICROS_TO_WEI: u64 = 1_000_000_000_000;

/// Builds the next request of `kind` from the fixed option tables.
pub fn pick_operation<R: Rng + ?Sized>(
    rng: &mut R,
    kind: OperationKind,
    tokens: &TokenManager,
    recipient: Address,
) -> Result<OperationRequest, AppError> {
    match kind {
        OperationKind::Transfer => Ok(OperationRequest::Transfer {
            to: random_address(rng),
            amount: parse_amount(TRANSFER_AMOUNT, NATIVE_DECIMALS)?,
        }),
        OperationKind::Swap => {
            let pairs: &[SwapPairOption] = &SWAP_PAIRS;
            let pair = pairs.choose(rng).ok_or_else(|| empty_table("swap pair"))?;
            let token_in = tokens.info(pair.from)?.clone();
            let token_out = tokens.info(pair.to)?.clone();
            Ok(OperationRequest::Swap {
                amount_in: parse_amount(pair.amount, token_in.decimals)?,
                token_in,
                token_out,
                router: SWAP_ROUTER,
                recipient,
            })
        }
        OperationKind::Wrap => {
            let micros = rng.gen_range(WRAP_MIN_MICROS..=WRAP_MAX_MICROS);
            Ok(OperationRequest::Wrap {
                wrapped: WPHRS,
                amount: U256::from(micros) * U256::from(MICROS_TO_WEI),
            })
        }
        OperationKind::AddLiquidity => {
            let options: &[LiquidityOption] = &LIQUIDITY_PAIRS;
            let option = options
                .choose(rng)
                .ok_or_else(|| empty_table("liquidity pair"))?;
            let token0 = tokens.info(option.token0)?.clone();
            let token1 = tokens.info(option.token1)?.clone();
            Ok(OperationRequest::AddLiquidity {
                amount0: parse_amount(option.amount0, token0.decimals)?,
                amount1: parse_amount(option.amount1, token1.decimals)?,
                token0,
                token1,
                fee: option.fee,
                position_manager: POSITION_MANAGER,
                recipient,
            })
        }
    }
}

/// Throwaway destination; nobody holds the key.
fn random_address<R: Rng + ?Sized>(rng: &mut R) -> Address {
    let mut bytes = [0u8; 20];
    rng.fill(&mut bytes[..]);
    Address::from(bytes)
}

fn empty_table(what: &str) -> AppError {
    AppError::Validation {
        field: what.to_string(),
        message: "option table is empty".into(),
    }
}
