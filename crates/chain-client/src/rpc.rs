//! JSON-RPC implementation of [`RoundChainClient`] over alloy.

use alloy::{
    providers::{Provider, RootProvider},
    rpc::{
        client::ClientBuilder,
        types::{Filter, Log},
    },
    sol,
    sol_types::SolEvent,
    transports::http::reqwest::Url,
};
use alloy_primitives::Address;
use arena_round_types::{
    BlockRange, ClaimedEvent, CommittedEvent, FinalizedEvent, LogPosition, PlayerClaimedEvent,
    RevealedEvent, RoundStateSnapshot, SteppedEvent,
};

use crate::{client::RoundChainClient, errors::ClientError};

sol! {
    #[sol(rpc)]
    contract ConwayArenaRound {
        function phase() external view returns (uint8);
        function gen() external view returns (uint16);
        function maxGen() external view returns (uint16);
        function maxBatch() external view returns (uint16);
        function totalFunded() external view returns (uint256);
        function winnerPaid() external view returns (uint256);
        function keeperPaid() external view returns (uint256);
        function treasuryDust() external view returns (uint256);

        event Stepped(uint16 fromGen, uint16 toGen, address keeper, uint256 reward);
        event Finalized(uint16 finalGen, uint256 winnerPoolFinal, uint256 keeperPaid, uint256 treasuryDust);
        event Claimed(uint256 distributed, uint256 cumulativeWinnerPaid, uint256 treasuryDust, uint256 remainingWinnerPool);
        event PlayerClaimed(address player, uint8 slotIndex, uint256 amount);
        event Committed(address player, uint8 team, uint8 slotIndex);
        event Revealed(address player, uint8 team, uint8 slotIndex);
    }

    #[sol(rpc)]
    contract ArenaRegistry {
        function currentRound() external view returns (address);
    }
}

/// The client produced by [`RpcRoundChainClient::connect_http`].
pub type HttpRoundChainClient = RpcRoundChainClient<RootProvider>;

/// [`RoundChainClient`] backed by an alloy provider.
#[derive(Debug, Clone)]
pub struct RpcRoundChainClient<P> {
    provider: P,
}

impl RpcRoundChainClient<RootProvider> {
    /// Connects over plain HTTP JSON-RPC.
    pub fn connect_http(rpc_url: &str) -> Result<Self, ClientError> {
        let url: Url = rpc_url
            .parse()
            .map_err(|_| ClientError::InvalidUrl(rpc_url.to_owned()))?;
        let client = ClientBuilder::default().http(url);
        Ok(Self::new(RootProvider::new(client)))
    }
}

impl<P: Provider + Clone> RpcRoundChainClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolves the active round address from the arena registry.
    pub async fn current_round(&self, registry: Address) -> Result<Address, ClientError> {
        let registry = ArenaRegistry::new(registry, self.provider.clone());
        let round = registry.currentRound().call().await?;
        if round == Address::ZERO {
            return Err(ClientError::EmptyRegistry);
        }
        Ok(round)
    }

    async fn fetch_decoded<E: SolEvent>(
        &self,
        event: &'static str,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<(LogPosition, E)>, ClientError> {
        let filter = Filter::new()
            .address(round)
            .event_signature(E::SIGNATURE_HASH)
            .from_block(range.from_block)
            .to_block(range.to_block);
        let logs = self.provider.get_logs(&filter).await?;

        logs.into_iter()
            .map(|log| {
                let position = require_position(event, &log)?;
                let decoded = log
                    .log_decode::<E>()
                    .map_err(|source| ClientError::LogDecode { event, source })?;
                Ok((position, decoded.inner.data))
            })
            .collect()
    }
}

/// Extracts the ordering key of a raw log, failing if the node omitted it
/// (e.g. for pending logs, which the indexer must never accept).
fn require_position(event: &'static str, log: &Log) -> Result<LogPosition, ClientError> {
    match (log.block_number, log.log_index) {
        (Some(block_number), Some(log_index)) => Ok(LogPosition {
            block_number,
            log_index,
        }),
        _ => Err(ClientError::UnorderedLog { event }),
    }
}

#[async_trait::async_trait]
impl<P: Provider + Clone> RoundChainClient for RpcRoundChainClient<P> {
    async fn chain_id(&self) -> Result<u64, ClientError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn latest_block_number(&self) -> Result<u64, ClientError> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn round_state(&self, round: Address) -> Result<RoundStateSnapshot, ClientError> {
        let round = ConwayArenaRound::new(round, self.provider.clone());
        let phase_call = round.phase();
        let gen_call = round.gen();
        let max_gen_call = round.maxGen();
        let max_batch_call = round.maxBatch();
        let total_funded_call = round.totalFunded();
        let winner_paid_call = round.winnerPaid();
        let keeper_paid_call = round.keeperPaid();
        let treasury_dust_call = round.treasuryDust();
        let (phase, gen, max_gen, max_batch, total_funded, winner_paid, keeper_paid, treasury_dust) =
            tokio::try_join!(
                phase_call.call(),
                gen_call.call(),
                max_gen_call.call(),
                max_batch_call.call(),
                total_funded_call.call(),
                winner_paid_call.call(),
                keeper_paid_call.call(),
                treasury_dust_call.call(),
            )?;

        Ok(RoundStateSnapshot {
            phase,
            gen,
            max_gen,
            max_batch,
            total_funded,
            winner_paid,
            keeper_paid,
            treasury_dust,
        })
    }

    async fn stepped_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<SteppedEvent>, ClientError> {
        let logs = self
            .fetch_decoded::<ConwayArenaRound::Stepped>("Stepped", round, range)
            .await?;
        Ok(logs
            .into_iter()
            .map(|(position, ev)| SteppedEvent {
                block_number: position.block_number,
                log_index: position.log_index,
                from_gen: ev.fromGen,
                to_gen: ev.toGen,
                keeper: ev.keeper,
                reward: ev.reward.into(),
            })
            .collect())
    }

    async fn finalized_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<FinalizedEvent>, ClientError> {
        let logs = self
            .fetch_decoded::<ConwayArenaRound::Finalized>("Finalized", round, range)
            .await?;
        Ok(logs
            .into_iter()
            .map(|(position, ev)| FinalizedEvent {
                block_number: position.block_number,
                log_index: position.log_index,
                final_gen: ev.finalGen,
                winner_pool_final: ev.winnerPoolFinal.into(),
                keeper_paid: ev.keeperPaid.into(),
                treasury_dust: ev.treasuryDust.into(),
            })
            .collect())
    }

    async fn claimed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<ClaimedEvent>, ClientError> {
        let logs = self
            .fetch_decoded::<ConwayArenaRound::Claimed>("Claimed", round, range)
            .await?;
        Ok(logs
            .into_iter()
            .map(|(position, ev)| ClaimedEvent {
                block_number: position.block_number,
                log_index: position.log_index,
                distributed: ev.distributed.into(),
                cumulative_winner_paid: ev.cumulativeWinnerPaid.into(),
                treasury_dust: ev.treasuryDust.into(),
                remaining_winner_pool: ev.remainingWinnerPool.into(),
            })
            .collect())
    }

    async fn player_claimed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<PlayerClaimedEvent>, ClientError> {
        let logs = self
            .fetch_decoded::<ConwayArenaRound::PlayerClaimed>("PlayerClaimed", round, range)
            .await?;
        Ok(logs
            .into_iter()
            .map(|(position, ev)| PlayerClaimedEvent {
                block_number: position.block_number,
                log_index: position.log_index,
                player: ev.player,
                slot_index: ev.slotIndex,
                amount: ev.amount.into(),
            })
            .collect())
    }

    async fn committed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<CommittedEvent>, ClientError> {
        let logs = self
            .fetch_decoded::<ConwayArenaRound::Committed>("Committed", round, range)
            .await?;
        Ok(logs
            .into_iter()
            .map(|(position, ev)| CommittedEvent {
                block_number: position.block_number,
                log_index: position.log_index,
                player: ev.player,
                team: ev.team,
                slot_index: ev.slotIndex,
            })
            .collect())
    }

    async fn revealed_events(
        &self,
        round: Address,
        range: BlockRange,
    ) -> Result<Vec<RevealedEvent>, ClientError> {
        let logs = self
            .fetch_decoded::<ConwayArenaRound::Revealed>("Revealed", round, range)
            .await?;
        Ok(logs
            .into_iter()
            .map(|(position, ev)| RevealedEvent {
                block_number: position.block_number,
                log_index: position.log_index,
                player: ev.player,
                team: ev.team,
                slot_index: ev.slotIndex,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_position_rejects_pending_logs() {
        let log = Log::default();
        let err = require_position("Stepped", &log).expect_err("pending log must be rejected");
        assert!(matches!(
            err,
            ClientError::UnorderedLog { event: "Stepped" }
        ));
    }
}
