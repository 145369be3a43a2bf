use std::path::PathBuf;

use argh::FromArgs;

#[derive(Debug, Clone, FromArgs)]
#[argh(description = "Conway arena round indexer and spectator endpoint")]
pub(crate) struct Args {
    #[argh(option, short = 'u', description = "EVM JSON-RPC endpoint URL")]
    pub rpc_url: String,

    #[argh(option, description = "round contract address to index")]
    pub round: Option<String>,

    #[argh(
        option,
        description = "registry contract to resolve the active round from"
    )]
    pub registry: Option<String>,

    #[argh(
        option,
        short = 'd',
        default = "PathBuf::from(\"arena-data\")",
        description = "directory holding the persisted model and cursor"
    )]
    pub datadir: PathBuf,

    #[argh(
        option,
        default = "2",
        description = "blocks held back from the chain tip"
    )]
    pub confirmations: u64,

    #[argh(
        option,
        default = "12",
        description = "blocks re-fetched behind the cursor to absorb reorgs"
    )]
    pub reorg_lookback: u64,

    #[argh(
        option,
        description = "force the fetch window to start at this block, ignoring the cursor"
    )]
    pub from_block: Option<u64>,

    #[argh(option, description = "force the fetch window to end at this block")]
    pub to_block: Option<u64>,

    #[argh(switch, description = "run a single sync pass and exit")]
    pub once: bool,

    #[argh(
        option,
        default = "5000",
        description = "delay between sync passes in ms"
    )]
    pub poll_interval_ms: u64,

    #[argh(
        option,
        default = "String::from(\"127.0.0.1\")",
        description = "spectator JSON-RPC host"
    )]
    pub rpc_host: String,

    #[argh(option, default = "8640", description = "spectator JSON-RPC port")]
    pub rpc_port: u16,

    #[argh(switch, description = "emit logs as JSON lines")]
    pub json_logs: bool,
}
