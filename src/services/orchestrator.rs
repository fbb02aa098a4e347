// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::app::config::GlobalSettings;
use crate::common::error::AppError;
use crate::domain::types::{Account, OperationKind, OperationOutcome, ProxyBinding};
use crate::network::api::{HttpVerificationApi, VerificationApi};
use crate::network::chain::{AlloyChain, ChainClient};
use crate::network::provider::ConnectionFactory;
use crate::network::proxy::{ProxyPool, build_http_client, random_user_agent, redact_proxy};
use crate::services::auth::SessionAuthenticator;
use crate::services::faucet::FaucetClaimer;
use crate::services::operations::{OperationContext, OperationExecutor};
use crate::services::stats::CycleStats;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Chain connection and API client bound to one wallet and one proxy for one cycle.
pub struct WalletSession {
    pub chain: Arc<dyn ChainClient>,
    pub api: Arc<dyn VerificationApi>,
}

pub trait SessionFactory: Send + Sync {
    fn open(
        &self,
        account: &Account,
        proxy: Option<&ProxyBinding>,
        user_agent: &str,
    ) -> Result<WalletSession, AppError>;
}

/// Production sessions: one reqwest client per wallet-cycle shared by RPC and API traffic.
#[derive(Debug, Clone)]
pub struct RpcSessionFactory {
    rpc_url: String,
    chain_id: u64,
    api_base_url: String,
}

impl RpcSessionFactory {
    pub fn new(rpc_url: impl Into<String>, chain_id: u64, api_base_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            chain_id,
            api_base_url: api_base_url.into(),
        }
    }
}

impl SessionFactory for RpcSessionFactory {
    fn open(
        &self,
        account: &Account,
        proxy: Option<&ProxyBinding>,
        user_agent: &str,
    ) -> Result<WalletSession, AppError> {
        let client = build_http_client(proxy, user_agent)?;
        let provider = ConnectionFactory::http_with_client(&self.rpc_url, client.clone())?;
        let chain = AlloyChain::new(provider, account.signer.clone(), self.chain_id);
        let api = HttpVerificationApi::new(client, &self.api_base_url)?;
        Ok(WalletSession {
            chain: Arc::new(chain),
            api: Arc::new(api),
        })
    }
}

/// Per-wallet operation counts, executed in `OperationKind::ORDERED` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePlan {
    pub transfers: u32,
    pub swaps: u32,
    pub wraps: u32,
    pub liquidity_adds: u32,
}

impl CyclePlan {
    pub fn from_settings(settings: &GlobalSettings) -> Self {
        Self {
            transfers: settings.num_transfers,
            swaps: settings.num_swaps,
            wraps: settings.num_wraps,
            liquidity_adds: settings.num_lps,
        }
    }

    pub fn count(&self, kind: OperationKind) -> u32 {
        match kind {
            OperationKind::Transfer => self.transfers,
            OperationKind::Swap => self.swaps,
            OperationKind::Wrap => self.wraps,
            OperationKind::AddLiquidity => self.liquidity_adds,
        }
    }

    pub fn total(&self) -> u32 {
        OperationKind::ORDERED.iter().map(|k| self.count(*k)).sum()
    }
}

pub struct CycleOrchestrator {
    accounts: Vec<Account>,
    proxies: ProxyPool,
    plan: CyclePlan,
    delay: Duration,
    sessions: Arc<dyn SessionFactory>,
    executor: OperationExecutor,
    authenticator: SessionAuthenticator,
    faucet: FaucetClaimer,
    rng: StdRng,
    cycle: u64,
}

impl CycleOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        accounts: Vec<Account>,
        proxies: ProxyPool,
        plan: CyclePlan,
        delay: Duration,
        sessions: Arc<dyn SessionFactory>,
        executor: OperationExecutor,
        authenticator: SessionAuthenticator,
        rng: StdRng,
    ) -> Self {
        Self {
            accounts,
            proxies,
            plan,
            delay,
            sessions,
            executor,
            faucet: FaucetClaimer::new(authenticator.clone()),
            authenticator,
            rng,
            cycle: 0,
        }
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycle
    }

    /// Runs cycles until `shutdown` fires. The delay between cycles is interruptible;
    /// an operation in flight is not.
    pub async fn run(&mut self, shutdown: CancellationToken) -> Result<(), AppError> {
        loop {
            if shutdown.is_cancelled() {
                break;
            }
            self.run_cycle(&shutdown).await;
            if shutdown.is_cancelled() {
                break;
            }

            tracing::info!(
                target: "cycle",
                cycle = self.cycle,
                delay_minutes = self.delay.as_secs() / 60,
                "Cycle {} completed. Waiting before next cycle",
                self.cycle
            );
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
        tracing::info!(target: "cycle", cycles = self.cycle, "Shutdown requested, stopping");
        Ok(())
    }

    /// One pass over every wallet. Wallet-level errors are logged and counted.
    pub async fn run_cycle(&mut self, shutdown: &CancellationToken) -> CycleStats {
        self.cycle += 1;
        let stats = CycleStats::default();
        tracing::info!(target: "cycle", cycle = self.cycle, wallets = self.accounts.len(), "Starting cycle {}", self.cycle);

        for idx in 0..self.accounts.len() {
            if shutdown.is_cancelled() {
                break;
            }
            let account = self.accounts[idx].clone();
            if let Err(e) = self.run_wallet(&account, &stats, shutdown).await {
                tracing::error!(
                    target: "cycle",
                    wallet = %account.address(),
                    index = account.index,
                    error = %e,
                    "Error processing wallet"
                );
                stats.record_wallet_failure();
            }
        }

        stats.log_summary(self.cycle);
        stats
    }

    async fn run_wallet(
        &mut self,
        account: &Account,
        stats: &CycleStats,
        shutdown: &CancellationToken,
    ) -> Result<(), AppError> {
        let proxy = self.proxies.pick(&mut self.rng);
        let user_agent = random_user_agent(&mut self.rng);
        tracing::info!(
            target: "cycle",
            index = account.index,
            wallet = %account.short_address(),
            proxy = %proxy.as_ref().map(|p| redact_proxy(&p.url)).unwrap_or_else(|| "direct".into()),
            "Wallet {}",
            account.index
        );

        let session = self.sessions.open(account, proxy.as_ref(), user_agent)?;
        let chain = session.chain.as_ref();
        let api = session.api.as_ref();

        let faucet = self.faucet.claim(account, api).await;
        stats.record_faucet(&faucet);

        let auth = self.authenticator.authenticate(account, api).await;
        match auth.credential() {
            Some(credential) => match api.profile(account.address(), credential).await {
                Ok(profile) => tracing::info!(
                    target: "auth",
                    wallet = %account.short_address(),
                    user_id = %profile.id,
                    task_points = profile.task_points.unwrap_or_default(),
                    total_points = profile.total_points.unwrap_or_default(),
                    "User profile"
                ),
                Err(e) => {
                    tracing::error!(target: "auth", wallet = %account.short_address(), error = %e, "Failed to fetch user info");
                    if e.is_credential_rejected() {
                        tracing::error!(target: "auth", "Received 403 Forbidden; the credential is invalid or expired");
                    }
                }
            },
            None => tracing::warn!(
                target: "auth",
                wallet = %account.short_address(),
                "No credential; skipping profile fetch and task verification"
            ),
        }

        let ctx = OperationContext {
            account,
            chain,
            api,
            credential: auth.credential(),
        };
        for kind in OperationKind::ORDERED {
            for n in 0..self.plan.count(kind) {
                if shutdown.is_cancelled() {
                    tracing::info!(target: "cycle", wallet = %account.short_address(), "Cancellation requested, stopping wallet");
                    return Ok(());
                }
                tracing::info!(target: "operation", kind = %kind, "Performing {} {}", kind, n + 1);
                let outcome = self.executor.run(ctx, kind, &mut self.rng).await;
                log_outcome(kind, &outcome);
                stats.record(kind, &outcome);
            }
        }

        tracing::info!(
            target: "cycle",
            index = account.index,
            "All operations for wallet {} completed",
            account.index
        );
        Ok(())
    }
}

fn log_outcome(kind: OperationKind, outcome: &OperationOutcome) {
    match outcome {
        OperationOutcome::Completed { hash, verified } => {
            tracing::info!(target: "operation", kind = %kind, hash = %hash, verified = ?verified, "{kind} completed");
        }
        OperationOutcome::Skipped(reason) => {
            tracing::warn!(target: "operation", kind = %kind, reason = %reason, "{kind} skipped");
        }
        OperationOutcome::Failed(reason) => {
            tracing::error!(target: "operation", kind = %kind, reason = %reason, "{kind} failed");
        }
    }
}
