// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::data::abi::IERC20;
use crate::domain::types::{CallRequest, FeeData, GasPlan, GasPricing, ReceiptSummary};
use crate::network::gas::GasOracle;
use crate::network::nonce::NonceManager;
use crate::network::provider::HttpProvider;
use alloy::consensus::{SignableTransaction, Signed, TxEip1559, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::eips::eip2930::AccessList;
use alloy::network::{ReceiptResponse, TxSignerSync};
use alloy::primitives::{Address, B256, Signature, TxKind, U256};
use alloy::providers::Provider;
use alloy::rpc::types::eth::{TransactionInput, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;

/// Account-bound view of the chain. Implementations never retry; callers decide.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address transactions are signed from.
    fn address(&self) -> Address;

    async fn native_balance(&self, owner: Address) -> Result<U256, AppError>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, AppError>;

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, AppError>;

    async fn fee_data(&self) -> Result<FeeData, AppError>;

    async fn estimate_gas(&self, call: &CallRequest) -> Result<u64, AppError>;

    async fn send_transaction(&self, call: &CallRequest, plan: &GasPlan) -> Result<B256, AppError>;

    /// `Ok(None)` while the transaction is not mined yet.
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>, AppError>;

    /// Drop any locally tracked nonce after a submission that may not have landed.
    fn resync_nonce(&self) {}
}

/// JSON-RPC backed client that signs locally and broadcasts raw transactions.
pub struct AlloyChain {
    provider: HttpProvider,
    signer: PrivateKeySigner,
    chain_id: u64,
    gas_oracle: GasOracle,
    nonces: NonceManager,
}

impl AlloyChain {
    pub fn new(provider: HttpProvider, signer: PrivateKeySigner, chain_id: u64) -> Self {
        let nonces = NonceManager::new(provider.clone(), signer.address());
        Self {
            gas_oracle: GasOracle::new(provider.clone()),
            provider,
            signer,
            chain_id,
            nonces,
        }
    }

    fn request(&self, call: &CallRequest) -> TransactionRequest {
        TransactionRequest {
            from: Some(self.signer.address()),
            to: Some(TxKind::Call(call.to)),
            value: Some(call.value),
            input: TransactionInput::new(call.data.clone()),
            chain_id: Some(self.chain_id),
            ..Default::default()
        }
    }

    async fn read_u256(&self, to: Address, data: Vec<u8>) -> Result<U256, AppError> {
        let out = self
            .provider
            .call(self.request(&CallRequest::new(to, data)))
            .await?;
        U256::abi_decode(&out).map_err(|e| AppError::Rpc {
            code: None,
            message: format!("undecodable uint256 from {to:#x}: {e}"),
        })
    }

    fn encode_signed<T>(&self, mut tx: T) -> Result<(Vec<u8>, B256), AppError>
    where
        T: SignableTransaction<Signature>,
        Signed<T>: Into<TxEnvelope>,
    {
        let sig = TxSignerSync::sign_transaction_sync(&self.signer, &mut tx)
            .map_err(|e| AppError::Signing(format!("Sign tx failed: {}", e)))?;
        let signed: TxEnvelope = tx.into_signed(sig).into();
        Ok((signed.encoded_2718(), *signed.tx_hash()))
    }

    fn sign(&self, call: &CallRequest, plan: &GasPlan, nonce: u64) -> Result<(Vec<u8>, B256), AppError> {
        match plan.pricing {
            GasPricing::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => self.encode_signed(TxEip1559 {
                chain_id: self.chain_id,
                nonce,
                gas_limit: plan.gas_limit,
                max_fee_per_gas,
                max_priority_fee_per_gas,
                to: TxKind::Call(call.to),
                value: call.value,
                access_list: AccessList::default(),
                input: call.data.clone(),
            }),
            GasPricing::Legacy { gas_price } => self.encode_signed(TxLegacy {
                chain_id: Some(self.chain_id),
                nonce,
                gas_price,
                gas_limit: plan.gas_limit,
                to: TxKind::Call(call.to),
                value: call.value,
                input: call.data.clone(),
            }),
        }
    }
}

#[async_trait]
impl ChainClient for AlloyChain {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn native_balance(&self, owner: Address) -> Result<U256, AppError> {
        Ok(self.provider.get_balance(owner).await?)
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, AppError> {
        self.read_u256(token, IERC20::balanceOfCall { account: owner }.abi_encode())
            .await
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, AppError> {
        self.read_u256(token, IERC20::allowanceCall { owner, spender }.abi_encode())
            .await
    }

    async fn fee_data(&self) -> Result<FeeData, AppError> {
        self.gas_oracle.fee_data().await
    }

    async fn estimate_gas(&self, call: &CallRequest) -> Result<u64, AppError> {
        Ok(self.provider.estimate_gas(self.request(call)).await?)
    }

    async fn send_transaction(&self, call: &CallRequest, plan: &GasPlan) -> Result<B256, AppError> {
        let nonce = self.nonces.reserve().await?;
        let (raw, hash) = self.sign(call, plan, nonce).inspect_err(|_| self.nonces.resync())?;
        match self.provider.send_raw_transaction(&raw).await {
            Ok(_) => {
                tracing::debug!(target: "rpc", nonce, hash = %hash, to = %call.to, "Raw transaction broadcast");
                Ok(hash)
            }
            Err(e) => {
                // The reserved nonce may or may not be consumed; re-read it next time.
                self.nonces.resync();
                Err(e.into())
            }
        }
    }

    fn resync_nonce(&self) {
        self.nonces.resync();
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>, AppError> {
        let receipt = self.provider.get_transaction_receipt(hash).await?;
        Ok(receipt.map(|r| ReceiptSummary {
            hash: r.transaction_hash(),
            block_number: r.block_number(),
            gas_used: r.gas_used(),
            success: r.status(),
        }))
    }
}
