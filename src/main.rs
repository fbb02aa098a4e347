// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use clap::Parser;
use pharos_cycler::app::config::GlobalSettings;
use pharos_cycler::app::logging::setup_logging;
use pharos_cycler::common::retry::BackoffSchedule;
use pharos_cycler::domain::constants::{NATIVE_SYMBOL, PHAROS_TESTNET_NAME};
use pharos_cycler::domain::error::AppError;
use pharos_cycler::domain::types::Account;
use pharos_cycler::infrastructure::data::token_manager::TokenManager;
use pharos_cycler::infrastructure::network::proxy::ProxyPool;
use pharos_cycler::services::auth::SessionAuthenticator;
use pharos_cycler::services::confirmation::ConfirmationPoller;
use pharos_cycler::services::gate::{ApprovalLedger, PreconditionGate};
use pharos_cycler::services::operations::OperationExecutor;
use pharos_cycler::services::orchestrator::{CycleOrchestrator, CyclePlan, RpcSessionFactory};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(author, version, about = "pharos testnet activity cycler")]
struct Cli {
    /// Path to config file (default: config.{toml,yaml,...})
    #[arg(long)]
    config: Option<String>,

    /// Minutes to wait between cycles (overrides config/env)
    #[arg(long)]
    delay_minutes: Option<u64>,

    /// Transfers per wallet per cycle
    #[arg(long)]
    transfers: Option<u32>,

    /// Swaps per wallet per cycle
    #[arg(long)]
    swaps: Option<u32>,

    /// Wraps per wallet per cycle
    #[arg(long)]
    wraps: Option<u32>,

    /// Liquidity adds per wallet per cycle
    #[arg(long)]
    lps: Option<u32>,

    /// Emit JSON log lines
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    fn apply(&self, settings: &mut GlobalSettings) {
        if let Some(v) = self.delay_minutes {
            settings.delay_minutes = v;
        }
        if let Some(v) = self.transfers {
            settings.num_transfers = v;
        }
        if let Some(v) = self.swaps {
            settings.num_swaps = v;
        }
        if let Some(v) = self.wraps {
            settings.num_wraps = v;
        }
        if let Some(v) = self.lps {
            settings.num_lps = v;
        }
        if self.json {
            settings.log_json = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut settings = GlobalSettings::load_with_path(cli.config.as_deref())?;
    cli.apply(&mut settings);
    setup_logging(
        if settings.debug { "debug" } else { "info" },
        settings.log_json,
    )?;
    settings.validate()?;

    let keys = settings.private_keys_value();
    if keys.is_empty() {
        tracing::error!(target: "config", "No private keys found (set PRIVATE_KEY_1, PRIVATE_KEY_2, ...)");
        return Err(AppError::Config("no private keys configured".into()));
    }
    let accounts = keys
        .iter()
        .enumerate()
        .map(|(i, key)| Account::from_key(i + 1, key))
        .collect::<Result<Vec<_>, _>>()?;

    let proxies = ProxyPool::load(&settings.proxies_path);
    let plan = CyclePlan::from_settings(&settings);

    tracing::info!(
        target: "config",
        network = PHAROS_TESTNET_NAME,
        chain_id = settings.chain_id,
        native = NATIVE_SYMBOL,
        delay_minutes = settings.delay_minutes,
        transfers = plan.transfers,
        swaps = plan.swaps,
        wraps = plan.wraps,
        liquidity_adds = plan.liquidity_adds,
        "Cycle plan"
    );
    tracing::info!(
        target: "config",
        wallets = accounts.len(),
        proxies = proxies.len(),
        "Loaded {} wallet(s)",
        accounts.len()
    );
    for account in &accounts {
        tracing::debug!(target: "config", index = account.index, address = %account.address(), "Wallet");
    }

    let poller = ConfirmationPoller::new(BackoffSchedule::new(
        settings.receipt_base_delay(),
        settings.receipt_max_retries,
    ));
    let gate = PreconditionGate::new(
        poller,
        ApprovalLedger::default(),
        settings.gas_limit_multiplier_bps,
    );
    let executor = OperationExecutor::new(
        TokenManager::pharos_testnet(),
        gate,
        poller,
        settings.gas_limit_multiplier_bps,
    );
    let sessions = Arc::new(RpcSessionFactory::new(
        settings.rpc_url.clone(),
        settings.chain_id,
        settings.api_base_url.clone(),
    ));

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!(target: "cycle", "Ctrl-C received, finishing current operation");
            ctrl_c.cancel();
        }
    });

    let mut orchestrator = CycleOrchestrator::new(
        accounts,
        proxies,
        plan,
        settings.cycle_delay(),
        sessions,
        executor,
        SessionAuthenticator::new(settings.invite_code.clone()),
        StdRng::from_entropy(),
    );
    orchestrator.run(shutdown).await
}
