// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

pub mod liquidity;
pub mod swap;
pub mod transfer;
pub mod wrap;

use crate::common::constants::{
    EXPLORER_TX_URL, LP_DEADLINE_SECS, NATIVE_DECIMALS, NATIVE_SYMBOL, NATIVE_TRANSFER_GAS_LIMIT,
    SWAP_DEADLINE_SECS,
};
use crate::common::error::AppError;
use crate::domain::types::{
    Account, CallRequest, Credential, GasPlan, OperationKind, OperationOutcome, OperationRequest,
    SkipReason, SubmittedTransaction,
};
use crate::infrastructure::data::token_manager::{TokenManager, format_amount};
use crate::network::api::VerificationApi;
use crate::network::chain::ChainClient;
use crate::services::confirmation::ConfirmationPoller;
use crate::services::gate::PreconditionGate;
use crate::services::selection::pick_operation;
use rand::Rng;

/// Everything one wallet's operation needs for the duration of a single run.
#[derive(Clone, Copy)]
pub struct OperationContext<'a> {
    pub account: &'a Account,
    pub chain: &'a dyn ChainClient,
    pub api: &'a dyn VerificationApi,
    pub credential: Option<&'a Credential>,
}

/// Shared select -> check -> estimate -> submit -> confirm -> verify template.
#[derive(Debug, Clone)]
pub struct OperationExecutor {
    tokens: TokenManager,
    gate: PreconditionGate,
    poller: ConfirmationPoller,
    gas_multiplier_bps: u64,
}

impl OperationExecutor {
    pub fn new(
        tokens: TokenManager,
        gate: PreconditionGate,
        poller: ConfirmationPoller,
        gas_multiplier_bps: u64,
    ) -> Self {
        Self {
            tokens,
            gate,
            poller,
            gas_multiplier_bps,
        }
    }

    /// Picks a request of `kind` and executes it.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        ctx: OperationContext<'_>,
        kind: OperationKind,
        rng: &mut R,
    ) -> OperationOutcome {
        match pick_operation(rng, kind, &self.tokens, ctx.account.address()) {
            Ok(request) => self.execute(ctx, request).await,
            Err(e) => {
                tracing::error!(target: "operation", kind = %kind, error = %e, "Could not build request");
                OperationOutcome::Failed(e.to_string())
            }
        }
    }

    /// Runs one request to a terminal outcome. Errors end here.
    pub async fn execute(
        &self,
        ctx: OperationContext<'_>,
        request: OperationRequest,
    ) -> OperationOutcome {
        let kind = request.kind();
        let wallet = ctx.account.short_address();
        tracing::info!(target: "operation", wallet = %wallet, kind = %kind, "{}", describe(&request));

        match self.preflight(ctx, &request).await {
            Ok(None) => {}
            Ok(Some(reason)) => {
                tracing::warn!(target: "operation", wallet = %wallet, kind = %kind, reason = %reason, "Skipping operation");
                return OperationOutcome::Skipped(reason);
            }
            Err(e) => {
                tracing::error!(target: "operation", wallet = %wallet, kind = %kind, error = %e, "Balance check failed");
                return OperationOutcome::Failed(e.to_string());
            }
        }

        let call = match build_call(&request) {
            Ok(call) => call,
            Err(e) => {
                tracing::error!(target: "operation", wallet = %wallet, kind = %kind, error = %e, "Could not encode call");
                return OperationOutcome::Failed(e.to_string());
            }
        };

        let plan = match self.plan_gas(ctx.chain, kind, &call).await {
            Ok(plan) => plan,
            Err(outcome) => return outcome,
        };

        let submitted = match ctx.chain.send_transaction(&call, &plan).await {
            Ok(hash) => SubmittedTransaction { hash, request },
            Err(e) => {
                tracing::error!(target: "operation", wallet = %wallet, kind = %kind, error = %e, "Submission failed");
                return OperationOutcome::Failed(e.to_string());
            }
        };
        tracing::info!(
            target: "operation",
            wallet = %wallet,
            kind = %kind,
            hash = %submitted.hash,
            gas_limit = plan.gas_limit,
            "Transaction sent, waiting for confirmation"
        );

        let receipt = match self.poller.wait_for_receipt(ctx.chain, submitted.hash).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::error!(target: "operation", wallet = %wallet, kind = %kind, hash = %submitted.hash, error = %e, "Confirmation failed");
                ctx.chain.resync_nonce();
                return OperationOutcome::Failed(e.to_string());
            }
        };
        if !receipt.success {
            let err = AppError::Transaction {
                hash: submitted.hash.to_string(),
                reason: "reverted".into(),
            };
            tracing::error!(
                target: "operation",
                wallet = %wallet,
                kind = %submitted.request.kind(),
                block = ?receipt.block_number,
                gas_used = receipt.gas_used,
                error = %err,
                "Transaction reverted"
            );
            return OperationOutcome::Failed(err.to_string());
        }

        tracing::info!(
            target: "operation",
            wallet = %wallet,
            kind = %kind,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            explorer = %format!("{EXPLORER_TX_URL}{}", submitted.hash),
            "Transaction confirmed"
        );

        let verified = self.verify(ctx, &submitted).await;
        OperationOutcome::Completed {
            hash: submitted.hash,
            verified,
        }
    }

    async fn preflight(
        &self,
        ctx: OperationContext<'_>,
        request: &OperationRequest,
    ) -> Result<Option<SkipReason>, AppError> {
        match request {
            OperationRequest::Transfer { amount, .. } | OperationRequest::Wrap { amount, .. } => {
                let balance = ctx.chain.native_balance(ctx.chain.address()).await?;
                if balance < *amount {
                    tracing::warn!(
                        target: "operation",
                        required = %format_amount(*amount, NATIVE_DECIMALS),
                        available = %format_amount(balance, NATIVE_DECIMALS),
                        "Insufficient {NATIVE_SYMBOL} balance"
                    );
                    return Ok(Some(SkipReason::InsufficientBalance));
                }
                Ok(None)
            }
            OperationRequest::Swap {
                token_in,
                amount_in,
                router,
                ..
            } => {
                let balance = ctx
                    .chain
                    .token_balance(token_in.address, ctx.chain.address())
                    .await?;
                if balance < *amount_in {
                    tracing::warn!(
                        target: "operation",
                        required = %token_in.format(*amount_in),
                        available = %token_in.format(balance),
                        "Insufficient {} balance",
                        token_in.symbol
                    );
                    return Ok(Some(SkipReason::InsufficientBalance));
                }
                if !self
                    .gate
                    .ensure_funded(ctx.chain, token_in, *amount_in, *router)
                    .await
                {
                    return Ok(Some(SkipReason::PreconditionFailed));
                }
                Ok(None)
            }
            OperationRequest::AddLiquidity {
                token0,
                token1,
                amount0,
                amount1,
                position_manager,
                ..
            } => {
                for (token, amount) in [(token0, amount0), (token1, amount1)] {
                    if !self
                        .gate
                        .ensure_funded(ctx.chain, token, *amount, *position_manager)
                        .await
                    {
                        return Ok(Some(SkipReason::PreconditionFailed));
                    }
                }
                Ok(None)
            }
        }
    }

    /// Transfers use the fixed intrinsic limit; everything else is estimated.
    async fn plan_gas(
        &self,
        chain: &dyn ChainClient,
        kind: OperationKind,
        call: &CallRequest,
    ) -> Result<GasPlan, OperationOutcome> {
        let estimate = if kind == OperationKind::Transfer {
            None
        } else {
            match chain.estimate_gas(call).await {
                Ok(estimate) => Some(estimate),
                Err(e) => {
                    tracing::error!(target: "operation", kind = %kind, error = %e, "Gas estimation failed");
                    return Err(OperationOutcome::Skipped(SkipReason::EstimationFailed));
                }
            }
        };

        let fees = chain.fee_data().await.map_err(|e| {
            tracing::error!(target: "operation", kind = %kind, error = %e, "Fee data unavailable");
            OperationOutcome::Failed(e.to_string())
        })?;

        Ok(match estimate {
            Some(estimate) => GasPlan::from_estimate(estimate, self.gas_multiplier_bps, &fees),
            None => GasPlan::fixed(NATIVE_TRANSFER_GAS_LIMIT, &fees),
        })
    }

    async fn verify(
        &self,
        ctx: OperationContext<'_>,
        submitted: &SubmittedTransaction,
    ) -> Option<bool> {
        let Some(credential) = ctx.credential else {
            tracing::warn!(
                target: "operation",
                hash = %submitted.hash,
                "No credential; skipping task verification"
            );
            return None;
        };
        match ctx
            .api
            .verify_task(ctx.account.address(), credential, submitted.hash)
            .await
        {
            Ok(true) => {
                tracing::info!(target: "operation", hash = %submitted.hash, "Task verified");
                Some(true)
            }
            Ok(false) => {
                tracing::warn!(target: "operation", hash = %submitted.hash, "Task verification not accepted");
                Some(false)
            }
            Err(e) => {
                tracing::error!(target: "operation", hash = %submitted.hash, error = %e, "Task verification failed");
                if e.is_credential_rejected() {
                    tracing::error!(target: "operation", "Received 403 Forbidden; the credential is invalid or expired");
                }
                Some(false)
            }
        }
    }
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

fn build_call(request: &OperationRequest) -> Result<CallRequest, AppError> {
    match request {
        OperationRequest::Transfer { to, amount } => Ok(transfer::call(*to, *amount)),
        OperationRequest::Wrap { wrapped, amount } => Ok(wrap::call(*wrapped, *amount)),
        OperationRequest::Swap {
            token_in,
            token_out,
            amount_in,
            router,
            recipient,
        } => Ok(swap::call(
            *router,
            token_in.address,
            token_out.address,
            *amount_in,
            *recipient,
            unix_now() + SWAP_DEADLINE_SECS,
        )),
        OperationRequest::AddLiquidity {
            token0,
            token1,
            amount0,
            amount1,
            fee,
            position_manager,
            recipient,
        } => liquidity::call(
            *position_manager,
            token0.address,
            token1.address,
            *fee,
            *amount0,
            *amount1,
            *recipient,
            unix_now() + LP_DEADLINE_SECS,
        ),
    }
}

fn describe(request: &OperationRequest) -> String {
    match request {
        OperationRequest::Transfer { to, amount } => format!(
            "Transferring {} {NATIVE_SYMBOL} to {to}",
            format_amount(*amount, NATIVE_DECIMALS)
        ),
        OperationRequest::Wrap { amount, .. } => format!(
            "Wrapping {} {NATIVE_SYMBOL}",
            format_amount(*amount, NATIVE_DECIMALS)
        ),
        OperationRequest::Swap {
            token_in,
            token_out,
            amount_in,
            ..
        } => format!(
            "Swapping {} {} for {}",
            token_in.format(*amount_in),
            token_in.symbol,
            token_out.symbol
        ),
        OperationRequest::AddLiquidity {
            token0,
            token1,
            amount0,
            amount1,
            ..
        } => format!(
            "Adding liquidity {} {} + {} {}",
            token0.format(*amount0),
            token0.symbol,
            token1.format(*amount1),
            token1.symbol
        ),
    }
}
