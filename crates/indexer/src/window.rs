//! Sync window calculation.

use arena_round_types::RoundSyncCursor;

/// Inputs for [`compute_sync_window`].
#[derive(Clone, Debug, Default)]
pub struct SyncWindowParams<'a> {
    pub latest_block: u64,
    /// Blocks held back from the tip before they are considered settled.
    pub confirmations: u64,
    /// How far behind the cursor to re-fetch, so a reorg within this depth
    /// is re-observed and replaced.
    pub reorg_lookback: u64,
    pub cursor: Option<&'a RoundSyncCursor>,
    pub explicit_from_block: Option<u64>,
    pub explicit_to_block: Option<u64>,
}

/// The block range the next sync pass should fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SyncWindow {
    pub from_block: u64,
    pub to_block: u64,
    pub used_cursor: bool,
}

/// Computes the `[fromBlock, toBlock]` range to fetch next.
///
/// Pure; never talks to the chain. An explicit from-block override always
/// wins over the cursor. A window with nothing new to report is clamped to
/// the degenerate `{toBlock, toBlock}` range rather than treated as an
/// error.
pub fn compute_sync_window(params: &SyncWindowParams<'_>) -> SyncWindow {
    let confirmed_tip = params.latest_block.saturating_sub(params.confirmations);
    let to_block = params.explicit_to_block.unwrap_or(confirmed_tip);

    let (from_block, used_cursor) = match (params.explicit_from_block, params.cursor) {
        (Some(explicit), _) => (explicit, false),
        (None, Some(cursor)) => (
            cursor.last_synced_block.saturating_sub(params.reorg_lookback),
            true,
        ),
        (None, None) => (0, false),
    };

    if to_block < from_block {
        return SyncWindow {
            from_block: to_block,
            to_block,
            used_cursor,
        };
    }

    SyncWindow {
        from_block,
        to_block,
        used_cursor,
    }
}
