// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::constants::{LP_TICK_LOWER, LP_TICK_UPPER};
use crate::common::error::AppError;
use crate::data::abi::INonfungiblePositionManager::{self, MintParams};
use crate::domain::types::CallRequest;
use alloy::primitives::aliases::{I24, U24};
use alloy::primitives::{Address, U256};
use alloy_sol_types::SolCall;

fn invalid(field: &str, message: String) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message,
    }
}

/// Full-range-ish `mint` with zero minimum amounts.
#[allow(clippy::too_many_arguments)]
pub fn call(
    position_manager: Address,
    token0: Address,
    token1: Address,
    fee: u32,
    amount0: U256,
    amount1: U256,
    recipient: Address,
    deadline: u64,
) -> Result<CallRequest, AppError> {
    let params = MintParams {
        token0,
        token1,
        fee: U24::try_from(fee).map_err(|e| invalid("fee", format!("{fee}: {e}")))?,
        tickLower: I24::try_from(LP_TICK_LOWER)
            .map_err(|e| invalid("tick_lower", format!("{LP_TICK_LOWER}: {e}")))?,
        tickUpper: I24::try_from(LP_TICK_UPPER)
            .map_err(|e| invalid("tick_upper", format!("{LP_TICK_UPPER}: {e}")))?,
        amount0Desired: amount0,
        amount1Desired: amount1,
        amount0Min: U256::ZERO,
        amount1Min: U256::ZERO,
        recipient,
        deadline: U256::from(deadline),
    };
    let data = INonfungiblePositionManager::mintCall { params }.abi_encode();
    Ok(CallRequest::new(position_manager, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::{POSITION_MANAGER, USDC, WPHRS};

    #[test]
    fn mint_params_keep_wide_ticks_and_zero_minimums() {
        let me = Address::repeat_byte(9);
        let call = call(
            POSITION_MANAGER,
            WPHRS,
            USDC,
            3_000,
            U256::from(10u64),
            U256::from(20u64),
            me,
            1_700_000_600,
        )
        .expect("mint call");
        assert_eq!(call.to, POSITION_MANAGER);

        let decoded = INonfungiblePositionManager::mintCall::abi_decode(&call.data).expect("decode");
        let p = decoded.params;
        assert_eq!(p.token0, WPHRS);
        assert_eq!(p.fee, U24::from(3_000u32));
        assert_eq!(p.tickLower, I24::try_from(-60_000i32).expect("tick"));
        assert_eq!(p.tickUpper, I24::try_from(60_000i32).expect("tick"));
        assert_eq!(p.amount1Desired, U256::from(20u64));
        assert_eq!(p.amount0Min, U256::ZERO);
        assert_eq!(p.amount1Min, U256::ZERO);
        assert_eq!(p.recipient, me);
        assert_eq!(p.deadline, U256::from(1_700_000_600u64));
    }
}
