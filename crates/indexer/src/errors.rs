//! Sync pipeline error types.

use alloy_primitives::{Address, U256};
use arena_chain_client::ClientError;
use thiserror::Error;

/// Failures of a sync pass. A pass either produces a complete new model or
/// fails with one of these before anything is persisted.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid block range: fromBlock {from} > toBlock {to}")]
    InvalidRange { from: u64, to: u64 },

    #[error("previous model round address {previous} does not match target round {target}")]
    RoundAddressMismatch { previous: Address, target: Address },

    #[error("previous model chain id {previous} does not match target chain {target}")]
    ChainIdMismatch { previous: u64, target: u64 },

    #[error("cursor round address {cursor} does not match requested round {target}")]
    CursorRoundMismatch { cursor: Address, target: Address },

    #[error("cursor chain id {cursor} does not match existing read model chain id {model}")]
    CursorChainMismatch { cursor: u64, model: u64 },

    #[error("missing finalized event")]
    MissingFinalized,

    /// Event-derived keeper payout disagrees with the contract-reported
    /// value. Indicates an indexer or contract accounting defect.
    #[error("keeper paid mismatch: sum of stepped rewards {derived} != finalized keeperPaid {reported}")]
    KeeperPaidMismatch { derived: U256, reported: U256 },

    #[error("amount overflow while summing {context}")]
    AmountOverflow { context: &'static str },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SyncError {
    /// Whether retrying the pass unchanged can ever succeed.
    ///
    /// Consistency and hard accounting errors do not heal on retry and must
    /// stop a scheduling loop; fetch and storage errors are transient.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::RoundAddressMismatch { .. }
                | Self::ChainIdMismatch { .. }
                | Self::CursorRoundMismatch { .. }
                | Self::CursorChainMismatch { .. }
                | Self::KeeperPaidMismatch { .. }
                | Self::AmountOverflow { .. }
        )
    }
}

/// Failures reading or writing the persisted model and cursor files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
