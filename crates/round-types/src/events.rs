//! Indexed contract event records.
//!
//! Each record carries its `(blockNumber, logIndex)` position, which is the
//! total-order key for every event list in the read model.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::bigint::TaggedU256;

/// Total-order key for event logs: block number first, then intra-block log
/// index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogPosition {
    pub block_number: u64,
    pub log_index: u64,
}

/// Accessor for anything keyed by `(blockNumber, logIndex)`.
pub trait ChainLog {
    fn position(&self) -> LogPosition;
}

macro_rules! impl_chain_log {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ChainLog for $ty {
                fn position(&self) -> LogPosition {
                    LogPosition {
                        block_number: self.block_number,
                        log_index: self.log_index,
                    }
                }
            }
        )+
    };
}

/// A keeper advanced the simulation by a batch of generations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteppedEvent {
    pub block_number: u64,
    pub log_index: u64,
    pub from_gen: u16,
    pub to_gen: u16,
    pub keeper: Address,
    pub reward: TaggedU256,
}

/// The round was finalized with its terminal pool accounting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedEvent {
    pub block_number: u64,
    pub log_index: u64,
    pub final_gen: u16,
    pub winner_pool_final: TaggedU256,
    pub keeper_paid: TaggedU256,
    pub treasury_dust: TaggedU256,
}

/// A bulk distribution of the winner pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedEvent {
    pub block_number: u64,
    pub log_index: u64,
    pub distributed: TaggedU256,
    pub cumulative_winner_paid: TaggedU256,
    pub treasury_dust: TaggedU256,
    pub remaining_winner_pool: TaggedU256,
}

/// A single player withdrew their share of the winner pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerClaimedEvent {
    pub block_number: u64,
    pub log_index: u64,
    pub player: Address,
    pub slot_index: u8,
    pub amount: TaggedU256,
}

/// A player committed a hidden seed into a team slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedEvent {
    pub block_number: u64,
    pub log_index: u64,
    pub player: Address,
    pub team: u8,
    pub slot_index: u8,
}

/// A player revealed their committed seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedEvent {
    pub block_number: u64,
    pub log_index: u64,
    pub player: Address,
    pub team: u8,
    pub slot_index: u8,
}

impl_chain_log!(
    SteppedEvent,
    FinalizedEvent,
    ClaimedEvent,
    PlayerClaimedEvent,
    CommittedEvent,
    RevealedEvent,
);
