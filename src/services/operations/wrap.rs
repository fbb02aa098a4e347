// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::data::abi::IWrappedNative;
use crate::domain::types::CallRequest;
use alloy::primitives::{Address, U256};
use alloy_sol_types::SolCall;

/// `deposit()` on the wrapped-native token carrying `amount` as value.
pub fn call(wrapped: Address, amount: U256) -> CallRequest {
    CallRequest::new(wrapped, IWrappedNative::depositCall {}.abi_encode()).with_value(amount)
}
