//! Participant roster and keeper leaderboard folds.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use arena_round_types::{CommittedEvent, PlayerClaimedEvent, RevealedEvent, SteppedEvent};
use serde::{Deserialize, Serialize};

/// One player's progress through the commit/reveal/claim lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantEntry {
    pub address: Address,
    pub team: u8,
    pub slot_index: u8,
    pub committed: bool,
    pub revealed: bool,
    /// Decimal string; `None` until the player has claimed.
    pub claimed_amount: Option<String>,
}

/// Aggregated keeper activity over the round's `Stepped` events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeeperEntry {
    pub address: Address,
    /// Decimal string of the keeper's total reward.
    pub total_reward: String,
    pub step_count: u64,
    pub gens_advanced: u64,
}

/// Folds commit, reveal, and per-player claim events into a roster sorted
/// by `(team, slotIndex)`. Reveals and claims for unknown players (possible
/// mid-window) are ignored.
pub fn build_participant_roster(
    committed: &[CommittedEvent],
    revealed: &[RevealedEvent],
    player_claimed: &[PlayerClaimedEvent],
) -> Vec<ParticipantEntry> {
    let mut by_player: HashMap<Address, ParticipantEntry> = HashMap::new();

    for ev in committed {
        by_player.insert(
            ev.player,
            ParticipantEntry {
                address: ev.player,
                team: ev.team,
                slot_index: ev.slot_index,
                committed: true,
                revealed: false,
                claimed_amount: None,
            },
        );
    }
    for ev in revealed {
        if let Some(entry) = by_player.get_mut(&ev.player) {
            entry.revealed = true;
        }
    }
    for ev in player_claimed {
        if let Some(entry) = by_player.get_mut(&ev.player) {
            entry.claimed_amount = Some(ev.amount.to_string());
        }
    }

    let mut roster: Vec<ParticipantEntry> = by_player.into_values().collect();
    roster.sort_by_key(|entry| (entry.team, entry.slot_index));
    roster
}

/// Aggregates `Stepped` events per keeper, sorted by total reward
/// descending. Saturating arithmetic: this is a display fold, not
/// accounting.
pub fn build_keeper_leaderboard(stepped: &[SteppedEvent]) -> Vec<KeeperEntry> {
    let mut totals: HashMap<Address, (U256, u64, u64)> = HashMap::new();

    for ev in stepped {
        let (reward, steps, gens) = totals.entry(ev.keeper).or_default();
        *reward = reward.saturating_add(ev.reward.0);
        *steps += 1;
        *gens += u64::from(ev.to_gen.saturating_sub(ev.from_gen));
    }

    let mut entries: Vec<(Address, U256, u64, u64)> = totals
        .into_iter()
        .map(|(address, (reward, steps, gens))| (address, reward, steps, gens))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .map(|(address, reward, steps, gens)| KeeperEntry {
            address,
            total_reward: reward.to_string(),
            step_count: steps,
            gens_advanced: gens,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use arena_round_types::TaggedU256;

    use super::*;

    const ALICE: Address = address!("00000000000000000000000000000000000000a1");
    const BOB: Address = address!("00000000000000000000000000000000000000b2");

    fn committed(player: Address, team: u8, slot_index: u8) -> CommittedEvent {
        CommittedEvent {
            block_number: 1,
            log_index: 0,
            player,
            team,
            slot_index,
        }
    }

    fn revealed(player: Address) -> RevealedEvent {
        RevealedEvent {
            block_number: 2,
            log_index: 0,
            player,
            team: 0,
            slot_index: 0,
        }
    }

    fn stepped(keeper: Address, from_gen: u16, to_gen: u16, reward: u64) -> SteppedEvent {
        SteppedEvent {
            block_number: 3,
            log_index: 0,
            from_gen,
            to_gen,
            keeper,
            reward: TaggedU256::from(reward),
        }
    }

    #[test]
    fn roster_tracks_commit_reveal_and_claim() {
        let claims = [PlayerClaimedEvent {
            block_number: 9,
            log_index: 0,
            player: ALICE,
            slot_index: 1,
            amount: TaggedU256::from(7u64),
        }];

        let roster = build_participant_roster(
            &[committed(BOB, 1, 0), committed(ALICE, 0, 1)],
            &[revealed(ALICE)],
            &claims,
        );

        assert_eq!(roster.len(), 2);
        // Sorted by (team, slot): alice on team 0 before bob on team 1.
        assert_eq!(roster[0].address, ALICE);
        assert!(roster[0].revealed);
        assert_eq!(roster[0].claimed_amount.as_deref(), Some("7"));
        assert_eq!(roster[1].address, BOB);
        assert!(!roster[1].revealed);
        assert_eq!(roster[1].claimed_amount, None);
    }

    #[test]
    fn roster_ignores_reveals_from_unknown_players() {
        let roster = build_participant_roster(&[], &[revealed(ALICE)], &[]);
        assert!(roster.is_empty());
    }

    #[test]
    fn leaderboard_aggregates_and_sorts_by_reward() {
        let events = [
            stepped(ALICE, 0, 2, 2),
            stepped(BOB, 2, 8, 5),
            stepped(ALICE, 8, 10, 2),
        ];

        let board = build_keeper_leaderboard(&events);

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].address, BOB);
        assert_eq!(board[0].total_reward, "5");
        assert_eq!(board[0].step_count, 1);
        assert_eq!(board[0].gens_advanced, 6);
        assert_eq!(board[1].address, ALICE);
        assert_eq!(board[1].total_reward, "4");
        assert_eq!(board[1].step_count, 2);
        assert_eq!(board[1].gens_advanced, 4);
    }
}
