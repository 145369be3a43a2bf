//! Contract state snapshot as reported by the round's view getters.

use alloy_primitives::U256;

/// Point-in-time values read directly from the round contract.
///
/// Counters are small unsigned integers matching the ABI; the four value
/// fields are raw 256-bit amounts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundStateSnapshot {
    pub phase: u8,
    pub gen: u16,
    pub max_gen: u16,
    pub max_batch: u16,
    pub total_funded: U256,
    pub winner_paid: U256,
    pub keeper_paid: U256,
    pub treasury_dust: U256,
}
