//! Read-model construction and reorg-safe merging.

use alloy_primitives::Address;
use arena_chain_client::RoundChainClient;
use arena_round_types::{
    BlockRange, ChainLog, ModelVersion, ReconciliationStatus, RoundAccounting, RoundEvents,
    RoundLifecycle, RoundReadModel,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    errors::SyncError,
    reconcile::{reconcile_round, ReconcileInput},
};

/// Inputs for [`build_round_read_model`].
#[derive(Clone, Debug, Default)]
pub struct BuildParams<'a> {
    pub round_address: Address,
    pub from_block: u64,
    /// When absent, resolved from the client's latest block number.
    pub to_block: Option<u64>,
    /// When absent, stamped with the current wall clock.
    pub synced_at: Option<DateTime<Utc>>,
    pub previous_model: Option<&'a RoundReadModel>,
}

/// Builds a new immutable read model for one fetch window.
///
/// Fetches the chain id, the contract state snapshot, and all six event
/// streams concurrently, merges them with the previous model (entries at or
/// past `from_block` are dropped and replaced by the fresh fetch, so a
/// reorganized window is reflected faithfully), and reconciles accounting
/// once a finalize event exists. No side effects; on any failure no model is
/// produced.
pub async fn build_round_read_model<C: RoundChainClient>(
    client: &C,
    params: BuildParams<'_>,
) -> Result<RoundReadModel, SyncError> {
    let from_block = params.from_block;
    let to_block = match params.to_block {
        Some(to_block) => to_block,
        None => client.latest_block_number().await?,
    };
    if to_block < from_block {
        return Err(SyncError::InvalidRange {
            from: from_block,
            to: to_block,
        });
    }
    let range = BlockRange {
        from_block,
        to_block,
    };

    let (chain_id, state, stepped, finalized, claimed, player_claimed, committed, revealed) =
        tokio::try_join!(
            client.chain_id(),
            client.round_state(params.round_address),
            client.stepped_events(params.round_address, range),
            client.finalized_events(params.round_address, range),
            client.claimed_events(params.round_address, range),
            client.player_claimed_events(params.round_address, range),
            client.committed_events(params.round_address, range),
            client.revealed_events(params.round_address, range),
        )?;

    if let Some(previous) = params.previous_model {
        if previous.round_address != params.round_address {
            return Err(SyncError::RoundAddressMismatch {
                previous: previous.round_address,
                target: params.round_address,
            });
        }
        if previous.chain_id != chain_id {
            return Err(SyncError::ChainIdMismatch {
                previous: previous.chain_id,
                target: chain_id,
            });
        }
    }

    let previous_events = params.previous_model.map(|model| &model.events);
    let events = RoundEvents {
        stepped: merge_window(
            previous_events.map_or(&[][..], |ev| &ev.stepped),
            stepped,
            from_block,
        ),
        finalized: merge_window(
            previous_events.map_or(&[][..], |ev| &ev.finalized),
            finalized,
            from_block,
        ),
        claimed: merge_window(
            previous_events.map_or(&[][..], |ev| &ev.claimed),
            claimed,
            from_block,
        ),
        player_claimed: merge_window(
            previous_events.map_or(&[][..], |ev| &ev.player_claimed),
            player_claimed,
            from_block,
        ),
        committed: merge_window(
            previous_events.map_or(&[][..], |ev| &ev.committed),
            committed,
            from_block,
        ),
        revealed: merge_window(
            previous_events.map_or(&[][..], |ev| &ev.revealed),
            revealed,
            from_block,
        ),
    };
    let event_counts = events.counts();
    debug!(
        from_block,
        to_block,
        stepped = event_counts.stepped,
        finalized = event_counts.finalized,
        "merged event streams"
    );

    // Lifecycle follows the last finalize event seen; a reorg can replace it.
    let finalize_event = events.finalized.last();
    let lifecycle = match finalize_event {
        Some(ev) => RoundLifecycle {
            finalized: true,
            final_gen: Some(ev.final_gen),
            winner_pool_final: Some(ev.winner_pool_final),
        },
        None => RoundLifecycle::default(),
    };

    let mut accounting = RoundAccounting {
        total_funded: state.total_funded.into(),
        winner_paid: state.winner_paid.into(),
        keeper_paid: state.keeper_paid.into(),
        treasury_dust: state.treasury_dust.into(),
        derived_keeper_paid: None,
        accounted_total: None,
        invariant_holds: None,
        reconciliation_status: ReconciliationStatus::PendingFinalize,
    };
    if finalize_event.is_some() {
        let reconciliation = reconcile_round(&ReconcileInput {
            total_funded: state.total_funded,
            stepped: &events.stepped,
            finalized: finalize_event,
            claimed: &events.claimed,
            player_claimed: &events.player_claimed,
        })?;
        accounting.derived_keeper_paid = Some(reconciliation.derived_keeper_paid.into());
        accounting.accounted_total = Some(reconciliation.accounted_total.into());
        accounting.invariant_holds = Some(reconciliation.invariant_holds);
        accounting.reconciliation_status = ReconciliationStatus::Ok;
    }

    Ok(RoundReadModel {
        version: ModelVersion::V1,
        chain_id,
        round_address: params.round_address,
        synced_at: params.synced_at.unwrap_or_else(Utc::now),
        cursor: range,
        phase: state.phase,
        gen: state.gen,
        max_gen: state.max_gen,
        max_batch: state.max_batch,
        lifecycle,
        events,
        event_counts,
        accounting,
    })
}

/// Drop-and-replace merge: prior entries at or past `from_block` are
/// superseded by the fresh fetch, which is authoritative for the window.
fn merge_window<T: ChainLog + Clone>(previous: &[T], fetched: Vec<T>, from_block: u64) -> Vec<T> {
    let mut merged: Vec<T> = previous
        .iter()
        .filter(|entry| entry.position().block_number < from_block)
        .cloned()
        .collect();
    merged.extend(fetched);
    merged.sort_by_key(|entry| entry.position());
    merged
}
