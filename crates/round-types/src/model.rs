//! The persisted read-model snapshot.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    bigint::TaggedU256,
    events::{
        ClaimedEvent, CommittedEvent, FinalizedEvent, PlayerClaimedEvent, RevealedEvent,
        SteppedEvent,
    },
};

/// Schema version tag for persisted documents.
///
/// A closed enum so that deserializing any unknown tag fails outright.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelVersion {
    #[default]
    #[serde(rename = "v1")]
    V1,
}

/// An inclusive block range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRange {
    pub from_block: u64,
    pub to_block: u64,
}

/// Lifecycle summary derived from the last `Finalized` event seen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLifecycle {
    pub finalized: bool,
    pub final_gen: Option<u16>,
    pub winner_pool_final: Option<TaggedU256>,
}

/// The six merged event streams, each sorted ascending by
/// `(blockNumber, logIndex)` with no duplicate keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEvents {
    pub stepped: Vec<SteppedEvent>,
    pub finalized: Vec<FinalizedEvent>,
    pub claimed: Vec<ClaimedEvent>,
    pub player_claimed: Vec<PlayerClaimedEvent>,
    pub committed: Vec<CommittedEvent>,
    pub revealed: Vec<RevealedEvent>,
}

impl RoundEvents {
    /// Cached lengths of each event list.
    pub fn counts(&self) -> EventCounts {
        EventCounts {
            stepped: self.stepped.len(),
            finalized: self.finalized.len(),
            claimed: self.claimed.len(),
            player_claimed: self.player_claimed.len(),
            committed: self.committed.len(),
            revealed: self.revealed.len(),
        }
    }
}

/// Cached event list lengths.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCounts {
    pub stepped: usize,
    pub finalized: usize,
    pub claimed: usize,
    pub player_claimed: usize,
    pub committed: usize,
    pub revealed: usize,
}

/// Whether reconciliation has run for this snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconciliationStatus {
    #[serde(rename = "ok")]
    Ok,
    #[default]
    #[serde(rename = "pending-finalize")]
    PendingFinalize,
}

/// Contract-reported and event-derived accounting values.
///
/// The first four fields come straight from the contract state; the derived
/// fields stay `None` until a `Finalized` event exists and reconciliation
/// has run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundAccounting {
    pub total_funded: TaggedU256,
    pub winner_paid: TaggedU256,
    pub keeper_paid: TaggedU256,
    pub treasury_dust: TaggedU256,
    pub derived_keeper_paid: Option<TaggedU256>,
    pub accounted_total: Option<TaggedU256>,
    pub invariant_holds: Option<bool>,
    pub reconciliation_status: ReconciliationStatus,
}

/// The persisted snapshot of one round: contract state plus full event
/// history. Immutable once written; replaced wholesale on every sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReadModel {
    pub version: ModelVersion,
    pub chain_id: u64,
    pub round_address: Address,
    pub synced_at: DateTime<Utc>,
    /// The block range that produced this snapshot. Not the same as
    /// historical coverage; earlier windows are folded into `events`.
    pub cursor: BlockRange,
    pub phase: u8,
    pub gen: u16,
    pub max_gen: u16,
    pub max_batch: u16,
    pub lifecycle: RoundLifecycle,
    pub events: RoundEvents,
    pub event_counts: EventCounts,
    pub accounting: RoundAccounting,
}
