// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::constants::SWAP_FEE_PARAM;
use crate::data::abi::{ISwapRouter, encode_swap_inner};
use crate::domain::types::CallRequest;
use alloy::primitives::{Address, U256};
use alloy_sol_types::SolCall;

/// Router `multicall(deadline, [inner])` with a single exact-input leg.
pub fn call(
    router: Address,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
    recipient: Address,
    deadline: u64,
) -> CallRequest {
    let inner = encode_swap_inner(token_in, token_out, SWAP_FEE_PARAM, recipient, amount_in);
    let data = ISwapRouter::multicallCall {
        collectionAndSelfcalls: U256::from(deadline),
        data: vec![inner],
    }
    .abi_encode();
    CallRequest::new(router, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::{SWAP_ROUTER, USDC, WPHRS};

    #[test]
    fn multicall_targets_router_without_value() {
        let me = Address::repeat_byte(7);
        let call = call(SWAP_ROUTER, WPHRS, USDC, U256::from(100u64), me, 1_700_000_300);
        assert_eq!(call.to, SWAP_ROUTER);
        assert_eq!(call.value, U256::ZERO);

        let decoded = ISwapRouter::multicallCall::abi_decode(&call.data).expect("multicall");
        assert_eq!(decoded.collectionAndSelfcalls, U256::from(1_700_000_300u64));
        assert_eq!(decoded.data.len(), 1);
        assert_eq!(hex::encode(&decoded.data[0][..4]), "04e45aaf");
        assert_eq!(&decoded.data[0][100 + 12..100 + 32], me.as_slice());
    }
}
