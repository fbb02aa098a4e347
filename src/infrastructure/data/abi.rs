// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::domain::constants::SWAP_INNER_SELECTOR;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy_sol_types::SolValue;

sol! {
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface IWrappedNative {
        function deposit() external payable;
    }

    interface ISwapRouter {
        function multicall(uint256 collectionAndSelfcalls, bytes[] data) external;
    }

    interface INonfungiblePositionManager {
        struct MintParams {
            address token0;
            address token1;
            uint24 fee;
            int24 tickLower;
            int24 tickUpper;
            uint256 amount0Desired;
            uint256 amount1Desired;
            uint256 amount0Min;
            uint256 amount1Min;
            address recipient;
            uint256 deadline;
        }

        function mint(MintParams params)
            external
            payable
            returns (uint256 tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);
    }
}

/// Inner router payload: selector `0x04e45aaf` followed by
/// `(tokenIn, tokenOut, 500, recipient, amountIn, 0, 0)` as flat params.
pub fn encode_swap_inner(
    token_in: Address,
    token_out: Address,
    fee_param: u64,
    recipient: Address,
    amount_in: U256,
) -> Bytes {
    let params = (
        token_in,
        token_out,
        U256::from(fee_param),
        recipient,
        amount_in,
        U256::ZERO,
        U256::ZERO,
    )
        .abi_encode_params();
    let mut out = Vec::with_capacity(4 + params.len());
    out.extend_from_slice(&SWAP_INNER_SELECTOR);
    out.extend_from_slice(&params);
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;

    #[test]
    fn swap_inner_payload_layout() {
        let token_in = Address::from([1u8; 20]);
        let token_out = Address::from([2u8; 20]);
        let recipient = Address::from([3u8; 20]);
        let data = encode_swap_inner(token_in, token_out, 500, recipient, U256::from(100u64));

        assert_eq!(hex::encode(&data[..4]), "04e45aaf");
        // seven static words
        assert_eq!(data.len(), 4 + 7 * 32);
        assert_eq!(&data[4 + 12..4 + 32], token_in.as_slice());
        assert_eq!(&data[36 + 12..36 + 32], token_out.as_slice());
        assert_eq!(U256::from_be_slice(&data[68..100]), U256::from(500u64));
        assert_eq!(&data[100 + 12..100 + 32], recipient.as_slice());
        assert_eq!(U256::from_be_slice(&data[132..164]), U256::from(100u64));
        assert_eq!(U256::from_be_slice(&data[164..196]), U256::ZERO);
        assert_eq!(U256::from_be_slice(&data[196..228]), U256::ZERO);
    }

    #[test]
    fn known_selectors() {
        let approve = IERC20::approveCall {
            spender: Address::ZERO,
            amount: U256::MAX,
        }
        .abi_encode();
        assert_eq!(hex::encode(&approve[..4]), "095ea7b3");

        let deposit = IWrappedNative::depositCall {}.abi_encode();
        assert_eq!(hex::encode(&deposit), "d0e30db0");

        let balance = IERC20::balanceOfCall {
            account: Address::ZERO,
        }
        .abi_encode();
        assert_eq!(hex::encode(&balance[..4]), "70a08231");
    }

    #[test]
    fn multicall_wraps_inner_payloads() {
        let inner = encode_swap_inner(
            Address::from([1u8; 20]),
            Address::from([2u8; 20]),
            500,
            Address::from([3u8; 20]),
            U256::from(1u64),
        );
        let call = ISwapRouter::multicallCall {
            collectionAndSelfcalls: U256::from(1_700_000_000u64),
            data: vec![inner.clone()],
        };
        let encoded = call.abi_encode();
        let decoded = ISwapRouter::multicallCall::abi_decode(&encoded).expect("decode multicall");
        assert_eq!(decoded.data, vec![inner]);
        assert_eq!(decoded.collectionAndSelfcalls, U256::from(1_700_000_000u64));
    }
}
