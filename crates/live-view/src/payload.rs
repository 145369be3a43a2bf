//! The assembled live payload served to spectators.

use alloy_primitives::Address;
use arena_round_types::{EventCounts, RoundReadModel};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::feeds::{build_keeper_leaderboard, build_participant_roster, KeeperEntry, ParticipantEntry};

/// Snapshots older than this are flagged stale to spectators.
pub const STALE_AFTER_SECS: i64 = 30;

/// Identity and lifecycle counters of the observed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLiveSummary {
    pub chain_id: u64,
    pub round_address: Address,
    pub phase: u8,
    pub gen: u16,
    pub max_gen: u16,
    pub max_batch: u16,
    pub finalized: bool,
    pub final_gen: Option<u16>,
}

/// Contract-reported accounting re-serialized as decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveAccounting {
    pub total_funded: String,
    pub winner_paid: String,
    pub keeper_paid: String,
    pub treasury_dust: String,
}

/// The full spectator payload derived from one read-model snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLivePayload {
    pub round: RoundLiveSummary,
    pub events: EventCounts,
    pub accounting: LiveAccounting,
    pub participants: Vec<ParticipantEntry>,
    pub keepers: Vec<KeeperEntry>,
    pub synced_at: DateTime<Utc>,
    pub stale: bool,
}

/// Folds a read model into the live payload. `now` is passed in so staleness
/// is decided by the caller's clock.
pub fn build_live_payload(model: &RoundReadModel, now: DateTime<Utc>) -> RoundLivePayload {
    let age = now.signed_duration_since(model.synced_at);

    RoundLivePayload {
        round: RoundLiveSummary {
            chain_id: model.chain_id,
            round_address: model.round_address,
            phase: model.phase,
            gen: model.gen,
            max_gen: model.max_gen,
            max_batch: model.max_batch,
            finalized: model.lifecycle.finalized,
            final_gen: model.lifecycle.final_gen,
        },
        events: model.event_counts.clone(),
        accounting: LiveAccounting {
            total_funded: model.accounting.total_funded.to_string(),
            winner_paid: model.accounting.winner_paid.to_string(),
            keeper_paid: model.accounting.keeper_paid.to_string(),
            treasury_dust: model.accounting.treasury_dust.to_string(),
        },
        participants: build_participant_roster(
            &model.events.committed,
            &model.events.revealed,
            &model.events.player_claimed,
        ),
        keepers: build_keeper_leaderboard(&model.events.stepped),
        synced_at: model.synced_at,
        stale: age > Duration::seconds(STALE_AFTER_SECS),
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use arena_round_types::{
        BlockRange, ModelVersion, RoundAccounting, RoundEvents, RoundLifecycle, TaggedU256,
    };

    use super::*;

    fn sample_model() -> RoundReadModel {
        let events = RoundEvents::default();
        let event_counts = events.counts();
        RoundReadModel {
            version: ModelVersion::V1,
            chain_id: 11011,
            round_address: address!("1111111111111111111111111111111111111111"),
            synced_at: "2026-02-12T17:00:00Z".parse().expect("timestamp"),
            cursor: BlockRange {
                from_block: 0,
                to_block: 12,
            },
            phase: 3,
            gen: 2,
            max_gen: 256,
            max_batch: 16,
            lifecycle: RoundLifecycle {
                finalized: true,
                final_gen: Some(2),
                winner_pool_final: Some(TaggedU256::from(8u64)),
            },
            events,
            event_counts,
            accounting: RoundAccounting {
                total_funded: TaggedU256::from(10u64),
                keeper_paid: TaggedU256::from(2u64),
                ..Default::default()
            },
        }
    }

    #[test]
    fn fresh_snapshot_is_not_stale() {
        let model = sample_model();
        let now = model.synced_at + Duration::seconds(STALE_AFTER_SECS);
        let payload = build_live_payload(&model, now);

        assert!(!payload.stale);
        assert_eq!(payload.round.final_gen, Some(2));
        assert_eq!(payload.accounting.total_funded, "10");
        assert_eq!(payload.accounting.keeper_paid, "2");
    }

    #[test]
    fn old_snapshot_is_flagged_stale() {
        let model = sample_model();
        let now = model.synced_at + Duration::seconds(STALE_AFTER_SECS + 1);
        assert!(build_live_payload(&model, now).stale);
    }

    #[test]
    fn payload_amounts_serialize_as_decimal_strings() {
        let model = sample_model();
        let payload = build_live_payload(&model, model.synced_at);
        let raw = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(raw["accounting"]["totalFunded"], "10");
        assert_eq!(raw["round"]["chainId"], 11011);
        assert_eq!(raw["stale"], false);
    }
}
