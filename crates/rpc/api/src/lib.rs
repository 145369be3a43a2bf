//! Arena spectator RPC API definitions.

use arena_live_view::RoundLivePayload;
use arena_round_types::RoundReadModel;
use jsonrpsee::{core::RpcResult, proc_macros::rpc};

/// Read-only methods served by the arena client over the persisted snapshot.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "arena"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "arena"))]
pub trait ArenaSpectatorRpc {
    /// Get the spectator view derived from the latest synced snapshot:
    /// round summary, participant roster, keeper leaderboard, and a
    /// staleness flag.
    #[method(name = "getRoundLiveView")]
    async fn get_round_live_view(&self) -> RpcResult<RoundLivePayload>;

    /// Get the raw persisted read model as last written by the indexer.
    #[method(name = "getRoundReadModel")]
    async fn get_round_read_model(&self) -> RpcResult<RoundReadModel>;
}
