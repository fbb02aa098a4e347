// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use alloy::primitives::{Address, address};

// =============================================================================
// NETWORK CONSTANTS
// =============================================================================

pub const PHAROS_TESTNET_NAME: &str = "Pharos Testnet";
pub const PHAROS_TESTNET_CHAIN_ID: u64 = 688_688;
pub const PHAROS_TESTNET_RPC_URL: &str = "https://testnet.dplabs-internal.com";
pub const NATIVE_SYMBOL: &str = "PHRS";
pub const NATIVE_DECIMALS: u8 = 18;
pub const EXPLORER_TX_URL: &str = "https://testnet.pharosscan.xyz/tx/";

// =============================================================================
// CONTRACTS
// =============================================================================

pub const USDC: Address = address!("ad902cf99c2de2f1ba5ec4d642fd7e49cae9ee37");
pub const WPHRS: Address = address!("76aaada469d23216be5f7c596fa25f282ff9b364");
pub const USDT: Address = address!("ed59de2d7ad9c043442e381231ee3646fc3c2939");
pub const POSITION_MANAGER: Address = address!("f8a1d4ff0f9b9af7ce58e1fc1833688f3bfd6115");
pub const SWAP_ROUTER: Address = address!("1a4de519154ae51200b0ad7c90f7fac75547888a");


// =============================================================================
// GAS & TRANSACTION CONSTANTS
// =============================================================================

pub const NATIVE_TRANSFER_GAS_LIMIT: u64 = 21_000;
/// 1.2x headroom on estimated gas.
pub const DEFAULT_GAS_LIMIT_MULTIPLIER_BPS: u64 = 12_000;
pub const FALLBACK_GAS_PRICE_WEI: u128 = 1_000_000_000;
pub const FALLBACK_PRIORITY_FEE_WEI: u128 = 1_000_000_000;

pub const RECEIPT_MAX_RETRIES: u32 = 5;
pub const RECEIPT_BASE_DELAY_MS: u64 = 1_000;

// =============================================================================
// OPERATION PARAMETERS
// =============================================================================

/// Inner call selector wrapped by the router's `multicall(uint256,bytes[])`.
pub const SWAP_INNER_SELECTOR: [u8; 4] = [0x04, 0xe4, 0x5a, 0xaf];
/// Third word of the inner swap payload. Sent as-is; meaning is owned by the router.
pub const SWAP_FEE_PARAM: u64 = 500;
pub const SWAP_DEADLINE_SECS: u64 = 300;

pub const LP_TICK_LOWER: i32 = -60_000;
pub const LP_TICK_UPPER: i32 = 60_000;
pub const LP_DEADLINE_SECS: u64 = 600;

pub const TRANSFER_AMOUNT: &str = "0.000001";
/// Wrap amount bounds in micro-native units (6 decimals).
pub const WRAP_MIN_MICROS: u64 = 1_000;
pub const WRAP_MAX_MICROS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPairOption {
    pub from: &'static str,
    pub to: &'static str,
    pub amount: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityOption {
    pub token0: &'static str,
    pub token1: &'static str,
    pub amount0: &'static str,
    pub amount1: &'static str,
    pub fee: u32,
}

pub const SWAP_PAIRS: [SwapPairOption; 6] = [
    SwapPairOption { from: "WPHRS", to: "USDC", amount: "0.0001" },
    SwapPairOption { from: "WPHRS", to: "USDT", amount: "0.0001" },
    SwapPairOption { from: "USDC", to: "WPHRS", amount: "0.0001" },
    SwapPairOption { from: "USDT", to: "WPHRS", amount: "0.0001" },
    SwapPairOption { from: "USDC", to: "USDT", amount: "0.0001" },
    SwapPairOption { from: "USDT", to: "USDC", amount: "0.0001" },
];

pub const LIQUIDITY_PAIRS: [LiquidityOption; 2] = [
    LiquidityOption {
        token0: "WPHRS",
        token1: "USDC",
        amount0: "0.0001",
        amount1: "0.0001",
        fee: 3_000,
    },
    LiquidityOption {
        token0: "WPHRS",
        token1: "USDT",
        amount0: "0.0001",
        amount1: "0.0001",
        fee: 3_000,
    },
];

// =============================================================================
// VERIFICATION API
// =============================================================================

pub const API_BASE_URL: &str = "https://api.pharosnetwork.xyz";
pub const API_REFERER: &str = "https://testnet.pharosnetwork.xyz/";
pub const LOGIN_MESSAGE: &str = "pharos";
pub const DEFAULT_INVITE_CODE: &str = "S6NGMzXSCDBxhnwo";
pub const VERIFY_TASK_ID: u32 = 103;

pub const DEFAULT_PROXIES_PATH: &str = "proxies.txt";
