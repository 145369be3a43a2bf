//! The chain access seam used by the sync pipeline.

use alloy_primitives::Address;
use arena_round_types::{
    BlockRange, ClaimedEvent, CommittedEvent, FinalizedEvent, PlayerClaimedEvent, RevealedEvent,
    RoundStateSnapshot, SteppedEvent,
};

use crate::errors::ClientError;

/// Read-only view of a round contract and its event streams.
///
/// All methods are independent reads; the builder issues them concurrently
/// within one sync pass. Event fetches cover the inclusive block range and
/// return entries carrying their `(blockNumber, logIndex)` position.
#[async_trait::async_trait]
pub trait RoundChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64, ClientError>;

    async fn latest_block_number(&self) -> Result<u64, ClientError>;

    async fn round_state(&self, round: Address) -> Result<RoundStateSnapshot, ClientError>;

    async fn stepped_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<SteppedEvent>, ClientError>;

    async fn finalized_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<FinalizedEvent>, ClientError>;

    async fn claimed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<ClaimedEvent>, ClientError>;

    async fn player_claimed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<PlayerClaimedEvent>, ClientError>;

    async fn committed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<CommittedEvent>, ClientError>;

    async fn revealed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<RevealedEvent>, ClientError>;
}
