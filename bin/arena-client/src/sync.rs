//! One persisted sync pass: window calculation, build, then store.

use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use arena_chain_client::RoundChainClient;
use arena_indexer::{
    build_round_read_model, compute_sync_window, store, BuildParams, SyncError, SyncWindow,
    SyncWindowParams,
};
use arena_round_types::{ModelVersion, RoundSyncCursor};
use tracing::info;

/// Locations of the persisted snapshot documents inside the data directory.
#[derive(Clone, Debug)]
pub(crate) struct StorePaths {
    pub(crate) model: PathBuf,
    pub(crate) cursor: PathBuf,
}

impl StorePaths {
    pub(crate) fn new(datadir: &Path) -> Self {
        Self {
            model: datadir.join("round-read-model.latest.json"),
            cursor: datadir.join("round-read-model.cursor.json"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SyncOptions {
    pub(crate) round_address: Address,
    pub(crate) confirmations: u64,
    pub(crate) reorg_lookback: u64,
    pub(crate) explicit_from_block: Option<u64>,
    pub(crate) explicit_to_block: Option<u64>,
}

/// What a completed pass covered, for logging.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SyncSummary {
    pub(crate) window: SyncWindow,
    pub(crate) finalized: bool,
}

/// Runs one full pass and persists the result.
///
/// The model is written before the cursor; a crash in between makes the
/// next pass re-fetch more than necessary rather than skip blocks.
pub(crate) async fn run_sync_pass<C: RoundChainClient>(
    client: &C,
    paths: &StorePaths,
    opts: &SyncOptions,
) -> Result<SyncSummary, SyncError> {
    let previous = store::read_read_model_if_exists(&paths.model)?;

    // An explicit window start is a manual override; the cursor is left
    // unread so the rewind logic cannot alter what was asked for.
    let cursor = if opts.explicit_from_block.is_some() {
        None
    } else {
        store::read_cursor(&paths.cursor)?
    };
    if let Some(cursor) = &cursor {
        if cursor.round_address != opts.round_address {
            return Err(SyncError::CursorRoundMismatch {
                cursor: cursor.round_address,
                target: opts.round_address,
            });
        }
        if let Some(previous) = &previous {
            if cursor.chain_id != previous.chain_id {
                return Err(SyncError::CursorChainMismatch {
                    cursor: cursor.chain_id,
                    model: previous.chain_id,
                });
            }
        }
    }

    let latest_block = client.latest_block_number().await?;
    let window = compute_sync_window(&SyncWindowParams {
        latest_block,
        confirmations: opts.confirmations,
        reorg_lookback: opts.reorg_lookback,
        cursor: cursor.as_ref(),
        explicit_from_block: opts.explicit_from_block,
        explicit_to_block: opts.explicit_to_block,
    });

    let model = build_round_read_model(
        client,
        BuildParams {
            round_address: opts.round_address,
            from_block: window.from_block,
            to_block: Some(window.to_block),
            synced_at: None,
            previous_model: previous.as_ref(),
        },
    )
    .await?;

    store::write_read_model(&paths.model, &model)?;
    store::write_cursor(
        &paths.cursor,
        &RoundSyncCursor {
            version: ModelVersion::V1,
            chain_id: model.chain_id,
            round_address: model.round_address,
            last_synced_block: model.cursor.to_block,
            synced_at: model.synced_at,
        },
    )?;

    info!(
        from_block = window.from_block,
        to_block = window.to_block,
        used_cursor = window.used_cursor,
        "sync pass persisted"
    );

    Ok(SyncSummary {
        window,
        finalized: model.lifecycle.finalized,
    })
}
