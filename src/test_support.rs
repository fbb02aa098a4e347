// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

//! In-memory chain and API doubles shared by unit tests.

use crate::common::error::{AppError, RPC_CODE_TX_NOT_INDEXED};
use crate::domain::types::{CallRequest, Credential, FeeData, GasPlan, ReceiptSummary};
use crate::network::api::{FaucetStatus, UserProfile, VerificationApi};
use crate::network::chain::ChainClient;
use alloy::primitives::{Address, B256, U256, address};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

pub const TEST_WALLET: Address = address!("00000000000000000000000000000000000000a1");

const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

fn plenty() -> U256 {
    U256::from(10u64).pow(U256::from(21u64))
}

/// Scripted answer for one receipt lookup.
#[derive(Debug, Clone, Copy)]
pub enum ReceiptStep {
    Absent,
    NotIndexed,
    RpcFailure,
    Mined { success: bool },
}

pub struct MockChain {
    address: Address,
    native: Mutex<U256>,
    tokens: Mutex<HashMap<Address, U256>>,
    allowances: Mutex<HashMap<(Address, Address), U256>>,
    receipts: Mutex<VecDeque<ReceiptStep>>,
    pub sent: Mutex<Vec<CallRequest>>,
    pub estimate_fails: AtomicBool,
    pub send_fails: AtomicBool,
    pub approvals_revert: AtomicBool,
    pub allowance_reads: AtomicUsize,
    pub receipt_lookups: AtomicUsize,
    pub nonce_resyncs: AtomicUsize,
    next_hash: AtomicU64,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            address: TEST_WALLET,
            native: Mutex::new(U256::ZERO),
            tokens: Mutex::new(HashMap::new()),
            allowances: Mutex::new(HashMap::new()),
            receipts: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            estimate_fails: AtomicBool::new(false),
            send_fails: AtomicBool::new(false),
            approvals_revert: AtomicBool::new(false),
            allowance_reads: AtomicUsize::new(0),
            receipt_lookups: AtomicUsize::new(0),
            nonce_resyncs: AtomicUsize::new(0),
            next_hash: AtomicU64::new(1),
        }
    }

    /// Plenty of native balance; token balances are plentiful unless set.
    pub fn funded() -> Self {
        let chain = Self::new();
        chain.set_native(plenty());
        chain
    }

    pub fn set_native(&self, amount: U256) {
        *self.native.lock().expect("native") = amount;
    }

    pub fn set_token(&self, token: Address, amount: U256) {
        self.tokens.lock().expect("tokens").insert(token, amount);
    }

    pub fn set_allowance(&self, token: Address, spender: Address, amount: U256) {
        self.allowances
            .lock()
            .expect("allowances")
            .insert((token, spender), amount);
    }

    pub fn script_receipts(&self, steps: impl IntoIterator<Item = ReceiptStep>) {
        self.receipts.lock().expect("receipts").extend(steps);
    }

    pub fn sent_calls(&self) -> Vec<CallRequest> {
        self.sent.lock().expect("sent").clone()
    }

    pub fn approvals_sent(&self) -> usize {
        self.sent_calls()
            .iter()
            .filter(|c| c.data.starts_with(&APPROVE_SELECTOR))
            .count()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn address(&self) -> Address {
        self.address
    }

    async fn native_balance(&self, _owner: Address) -> Result<U256, AppError> {
        Ok(*self.native.lock().expect("native"))
    }

    async fn token_balance(&self, token: Address, _owner: Address) -> Result<U256, AppError> {
        // Unset tokens read as plentiful so only explicit shortfalls matter.
        Ok(self
            .tokens
            .lock()
            .expect("tokens")
            .get(&token)
            .copied()
            .unwrap_or_else(plenty))
    }

    async fn allowance(
        &self,
        token: Address,
        _owner: Address,
        spender: Address,
    ) -> Result<U256, AppError> {
        self.allowance_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .allowances
            .lock()
            .expect("allowances")
            .get(&(token, spender))
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn fee_data(&self) -> Result<FeeData, AppError> {
        Ok(FeeData {
            gas_price: 1_000_000_000,
            max_fee_per_gas: Some(3_000_000_000),
            max_priority_fee_per_gas: Some(1_000_000_000),
        })
    }

    async fn estimate_gas(&self, _call: &CallRequest) -> Result<u64, AppError> {
        if self.estimate_fails.load(Ordering::SeqCst) {
            return Err(AppError::Rpc {
                code: Some(3),
                message: "execution reverted".into(),
            });
        }
        Ok(100_000)
    }

    async fn send_transaction(&self, call: &CallRequest, _plan: &GasPlan) -> Result<B256, AppError> {
        if self.send_fails.load(Ordering::SeqCst) {
            return Err(AppError::Rpc {
                code: Some(-32000),
                message: "nonce too low".into(),
            });
        }
        let is_approve = call.data.starts_with(&APPROVE_SELECTOR);
        if is_approve && self.approvals_revert.load(Ordering::SeqCst) {
            self.script_receipts([ReceiptStep::Mined { success: false }]);
        } else if is_approve {
            let spender = Address::from_slice(&call.data[16..36]);
            self.set_allowance(call.to, spender, U256::MAX);
        }
        self.sent.lock().expect("sent").push(call.clone());
        let n = self.next_hash.fetch_add(1, Ordering::SeqCst);
        Ok(B256::left_padding_from(&n.to_be_bytes()))
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>, AppError> {
        self.receipt_lookups.fetch_add(1, Ordering::SeqCst);
        let step = self
            .receipts
            .lock()
            .expect("receipts")
            .pop_front()
            .unwrap_or(ReceiptStep::Mined { success: true });
        match step {
            ReceiptStep::Absent => Ok(None),
            ReceiptStep::NotIndexed => Err(AppError::Rpc {
                code: Some(RPC_CODE_TX_NOT_INDEXED),
                message: "transaction not found".into(),
            }),
            ReceiptStep::RpcFailure => Err(AppError::Connection("connection reset".into())),
            ReceiptStep::Mined { success } => Ok(Some(ReceiptSummary {
                hash,
                block_number: Some(100),
                gas_used: 21_000,
                success,
            })),
        }
    }

    fn resync_nonce(&self) {
        self.nonce_resyncs.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockApi {
    pub login_fails: AtomicBool,
    pub check_in_fails: AtomicBool,
    pub faucet_available: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            login_fails: AtomicBool::new(false),
            check_in_fails: AtomicBool::new(false),
            faucet_available: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().expect("calls").push(call.to_string());
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls
            .lock()
            .expect("calls")
            .iter()
            .filter(|c| c.as_str() == call)
            .count()
    }
}

#[async_trait]
impl VerificationApi for MockApi {
    async fn login(
        &self,
        _address: Address,
        signature: &str,
        _invite_code: &str,
    ) -> Result<Credential, AppError> {
        self.record("login");
        assert!(signature.starts_with("0x"), "signature must be 0x-hex");
        if self.login_fails.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                endpoint: "/user/login".into(),
                msg: "invalid signature".into(),
            });
        }
        Ok(Credential::new("jwt-token"))
    }

    async fn check_in(&self, _address: Address, _credential: &Credential) -> Result<(), AppError> {
        self.record("check_in");
        if self.check_in_fails.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                endpoint: "/sign/in".into(),
                msg: "already signed in today".into(),
            });
        }
        Ok(())
    }

    async fn profile(
        &self,
        _address: Address,
        _credential: &Credential,
    ) -> Result<UserProfile, AppError> {
        self.record("profile");
        Ok(UserProfile {
            id: serde_json::json!(7),
            task_points: Some(20),
            total_points: Some(120),
        })
    }

    async fn faucet_status(
        &self,
        _address: Address,
        _credential: &Credential,
    ) -> Result<FaucetStatus, AppError> {
        self.record("faucet_status");
        Ok(FaucetStatus {
            is_able_to_faucet: self.faucet_available.load(Ordering::SeqCst),
            available_at: 1_750_000_000,
        })
    }

    async fn claim_faucet(
        &self,
        _address: Address,
        _credential: &Credential,
    ) -> Result<(), AppError> {
        self.record("claim_faucet");
        Ok(())
    }

    async fn verify_task(
        &self,
        _address: Address,
        _credential: &Credential,
        _tx_hash: B256,
    ) -> Result<bool, AppError> {
        self.record("verify_task");
        Ok(true)
    }
}
