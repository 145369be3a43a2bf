//! Conway arena round indexer daemon.
//!
//! Polls a round contract, maintains the persisted read model, and serves
//! the spectator RPC over it.

mod args;
mod rpc;
mod sync;

use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{bail, Context};
use arena_chain_client::{HttpRoundChainClient, RpcRoundChainClient};
use arena_common::logging::{self, LoggerConfig};
use args::Args;
use sync::{run_sync_pass, StorePaths, SyncOptions, SyncSummary};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    // Start runtime for async IO tasks.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("arena-rt")
        .build()
        .context("init: build rt")?;

    init_logging(&args);

    runtime.block_on(run(args))
}

fn init_logging(args: &Args) {
    let mut lconfig = LoggerConfig::new("arena-client".to_owned());
    if args.json_logs {
        lconfig = lconfig.with_json_format();
    }
    logging::init(lconfig);
}

async fn run(args: Args) -> anyhow::Result<()> {
    let client = RpcRoundChainClient::connect_http(&args.rpc_url)?;
    let round_address = resolve_round(&client, &args).await?;
    info!(%round_address, "indexing round");

    let paths = StorePaths::new(&args.datadir);
    let opts = SyncOptions {
        round_address,
        confirmations: args.confirmations,
        reorg_lookback: args.reorg_lookback,
        explicit_from_block: args.from_block,
        explicit_to_block: args.to_block,
    };

    if args.once {
        let summary = run_sync_pass(&client, &paths, &opts).await?;
        log_pass(&summary, "single pass complete");
        return Ok(());
    }

    let _rpc_handle = rpc::start_rpc(paths.clone(), &args.rpc_host, args.rpc_port).await?;

    let mut ticker = interval(Duration::from_millis(args.poll_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        match run_sync_pass(&client, &paths, &opts).await {
            Ok(summary) => log_pass(&summary, "sync pass complete"),
            Err(err) if err.is_fatal() => {
                error!(%err, "unrecoverable sync failure, shutting down");
                return Err(err.into());
            }
            Err(err) => {
                error!(%err, "sync pass failed, retrying next tick");
            }
        }
    }
}

fn log_pass(summary: &SyncSummary, msg: &str) {
    info!(
        from_block = summary.window.from_block,
        to_block = summary.window.to_block,
        finalized = summary.finalized,
        "{msg}"
    );
}

/// Picks the round to index: an explicit address wins, otherwise the
/// registry is asked for the active round.
async fn resolve_round(client: &HttpRoundChainClient, args: &Args) -> anyhow::Result<Address> {
    if let Some(round) = &args.round {
        return round
            .parse()
            .with_context(|| format!("invalid round address: {round}"));
    }
    if let Some(registry) = &args.registry {
        let registry: Address = registry
            .parse()
            .with_context(|| format!("invalid registry address: {registry}"))?;
        let round = client
            .current_round(registry)
            .await
            .context("resolve active round from registry")?;
        info!(%registry, %round, "resolved active round");
        return Ok(round);
    }
    bail!("either --round or --registry is required")
}
