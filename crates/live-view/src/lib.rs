//! Spectator-facing projections of the persisted read model.
//!
//! Everything here folds the snapshot's event lists into display-ready
//! structures; nothing touches the chain or the store.

pub mod feeds;
pub mod payload;

pub use feeds::{build_keeper_leaderboard, build_participant_roster, KeeperEntry, ParticipantEntry};
pub use payload::{build_live_payload, LiveAccounting, RoundLivePayload, RoundLiveSummary};
