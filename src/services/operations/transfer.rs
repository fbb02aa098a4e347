// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::types::CallRequest;
use alloy::primitives::{Address, Bytes, U256};

/// Plain value transfer; no calldata.
pub fn call(to: Address, amount: U256) -> CallRequest {
    CallRequest::new(to, Bytes::new()).with_value(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_is_value_only() {
        let to = Address::repeat_byte(0x42);
        let call = call(to, U256::from(1_000u64));
        assert_eq!(call.to, to);
        assert!(call.data.is_empty());
        assert_eq!(call.value, U256::from(1_000u64));
    }
}
