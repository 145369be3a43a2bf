//! Spectator RPC served straight off the persisted snapshot.

use anyhow::Context;
use arena_indexer::store;
use arena_live_view::{build_live_payload, RoundLivePayload};
use arena_round_types::RoundReadModel;
use arena_rpc_api::ArenaSpectatorRpcServer;
use async_trait::async_trait;
use chrono::Utc;
use jsonrpsee::{
    core::RpcResult,
    server::{ServerBuilder, ServerHandle},
    types::{error::INTERNAL_ERROR_CODE, ErrorObjectOwned},
};
use tracing::info;

use crate::sync::StorePaths;

/// Reads the store on every call; the only coupling with the sync loop is
/// the snapshot files themselves.
#[derive(Clone, Debug)]
struct SpectatorRpc {
    paths: StorePaths,
}

impl SpectatorRpc {
    fn load_model(&self) -> Result<RoundReadModel, ErrorObjectOwned> {
        store::read_read_model(&self.paths.model).map_err(|e| {
            ErrorObjectOwned::owned(
                INTERNAL_ERROR_CODE,
                format!("read model unavailable: {e}"),
                None::<()>,
            )
        })
    }
}

#[async_trait]
impl ArenaSpectatorRpcServer for SpectatorRpc {
    async fn get_round_live_view(&self) -> RpcResult<RoundLivePayload> {
        let model = self.load_model()?;
        Ok(build_live_payload(&model, Utc::now()))
    }

    async fn get_round_read_model(&self) -> RpcResult<RoundReadModel> {
        Ok(self.load_model()?)
    }
}

pub(crate) async fn start_rpc(
    paths: StorePaths,
    host: &str,
    port: u16,
) -> anyhow::Result<ServerHandle> {
    let addr = format!("{host}:{port}");
    let server = ServerBuilder::new()
        .build(&addr)
        .await
        .with_context(|| format!("failed to bind spectator rpc on {addr}"))?;

    let handle = server.start(SpectatorRpc { paths }.into_rpc());
    info!(%addr, "spectator rpc listening");

    Ok(handle)
}
