//! Reward arithmetic mirroring the on-chain claim contract.
//!
//! The contract is authoritative; this module exists so the server can
//! estimate payouts and settle claim math identically. Amounts are in
//! token wei (18 decimals) and use `U256` throughout so there is no
//! precision divergence from the contract.

use alloy::primitives::U256;

pub const POINTS_PER_WIN: u64 = 10;
pub const POINTS_PER_TOP5: u64 = 5;
pub const POINTS_PER_START: u64 = 1;

/// Whole tokens paid per point, before the halving multiplier.
pub const TOKENS_PER_POINT: u64 = 10;

/// Cumulative claims (whole tokens) per halving tier.
pub const HALVING_INTERVAL_TOKENS: u64 = 100_000_000;

/// Total claimable pool (whole tokens).
pub const TOTAL_POOL_TOKENS: u64 = 500_000_000;

/// One token in wei.
fn token() -> U256 {
    U256::from(10u64).pow(U256::from(18u64))
}

pub fn halving_interval() -> U256 {
    U256::from(HALVING_INTERVAL_TOKENS) * token()
}

pub fn total_pool() -> U256 {
    U256::from(TOTAL_POOL_TOKENS) * token()
}

pub fn points_value(wins: u64, top5s: u64, starts: u64) -> u64 {
    wins * POINTS_PER_WIN + top5s * POINTS_PER_TOP5 + starts * POINTS_PER_START
}

/// Payout multiplier in percent for the tier containing
/// `total_claimed`. Starts at 100 and halves every
/// [`HALVING_INTERVAL_TOKENS`] of cumulative claims; integer halving
/// bottoms out at zero once the pool is this deep.
pub fn multiplier_percent(total_claimed: U256) -> u32 {
    let tier = total_claimed / halving_interval();
    if tier >= U256::from(7u64) {
        return 0;
    }
    100u32 >> tier.to::<u64>()
}

/// Estimate form used by the UI: raw points payout scaled by an
/// already-known multiplier. Zero is a valid "nothing to claim" result.
pub fn compute_reward(wins: u64, top5s: u64, starts: u64, multiplier_percent: u32) -> U256 {
    let raw = U256::from(points_value(wins, top5s, starts)) * U256::from(TOKENS_PER_POINT) * token();
    raw * U256::from(multiplier_percent) / U256::from(100u64)
}

/// Authoritative settlement: pays at the current tier's rate, clips
/// the payout at the next halving boundary (the clipped remainder is
/// forfeited, not re-rated), then caps at the remaining pool.
pub fn settle_claim(wins: u64, top5s: u64, starts: u64, total_claimed: U256) -> U256 {
    let pool = total_pool();
    if total_claimed >= pool {
        return U256::ZERO;
    }

    let interval = halving_interval();
    let tier = total_claimed / interval;
    let mut amount = compute_reward(wins, top5s, starts, multiplier_percent(total_claimed));

    let tier_end = (tier + U256::from(1u64)) * interval;
    if total_claimed + amount > tier_end {
        amount = tier_end - total_claimed;
    }

    let remaining = pool - total_claimed;
    if amount > remaining {
        amount = remaining;
    }

    amount
}
