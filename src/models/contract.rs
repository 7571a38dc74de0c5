use alloy::primitives::U256;
use serde::Serialize;

/// Halving/progress summary derived from four scalar contract reads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractStatsResponse {
    pub total_claimed: String,
    pub total_pool: String,
    pub halving_interval: String,
    pub current_multiplier: u32,
    pub current_tier: u64,
    pub tier_start: String,
    pub tier_end: String,
    pub tier_progress_percent: f64,
    pub remaining_to_halving: String,
    /// True when the RPC read failed and defaults are being served.
    pub fallback: bool,
}

impl ContractStatsResponse {
    pub fn derive(
        total_claimed: U256,
        total_pool: U256,
        halving_interval: U256,
        current_multiplier: u32,
    ) -> Self {
        let (tier, tier_start, tier_end, progress, remaining) = if halving_interval.is_zero() {
            (0, U256::ZERO, U256::ZERO, 0.0, U256::ZERO)
        } else {
            // Saturating throughout: a misbehaving contract must never
            // panic this derivation.
            let tier = total_claimed / halving_interval;
            let tier_start = tier * halving_interval;
            let tier_end = tier_start.saturating_add(halving_interval);
            let into_tier = total_claimed - tier_start;
            // Basis points fit comfortably in u64.
            let progress = (into_tier.saturating_mul(U256::from(10_000u64)) / halving_interval)
                .saturating_to::<u64>() as f64
                / 100.0;
            let remaining = tier_end - total_claimed;
            (tier.saturating_to::<u64>(), tier_start, tier_end, progress, remaining)
        };

        Self {
            total_claimed: total_claimed.to_string(),
            total_pool: total_pool.to_string(),
            halving_interval: halving_interval.to_string(),
            current_multiplier,
            current_tier: tier,
            tier_start: tier_start.to_string(),
            tier_end: tier_end.to_string(),
            tier_progress_percent: progress,
            remaining_to_halving: remaining.to_string(),
            fallback: false,
        }
    }

    /// Defaults served when the RPC read fails; the page degrades
    /// instead of breaking.
    pub fn fallback() -> Self {
        Self {
            total_claimed: "0".to_string(),
            total_pool: crate::reward::total_pool().to_string(),
            halving_interval: crate::reward::halving_interval().to_string(),
            current_multiplier: 100,
            current_tier: 0,
            tier_start: "0".to_string(),
            tier_end: crate::reward::halving_interval().to_string(),
            tier_progress_percent: 0.0,
            remaining_to_halving: crate::reward::halving_interval().to_string(),
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_tier_bounds_and_progress() {
        let interval = U256::from(100u64);
        let stats =
            ContractStatsResponse::derive(U256::from(250u64), U256::from(500u64), interval, 25);
        assert_eq!(stats.current_tier, 2);
        assert_eq!(stats.tier_start, "200");
        assert_eq!(stats.tier_end, "300");
        assert_eq!(stats.remaining_to_halving, "50");
        assert!((stats.tier_progress_percent - 50.0).abs() < 1e-9);
        assert!(!stats.fallback);
    }

    #[test]
    fn absurd_contract_values_do_not_panic() {
        // Tier index beyond u64 saturates instead of panicking.
        let stats = ContractStatsResponse::derive(
            U256::from(u64::MAX) + U256::from(1u64),
            U256::MAX,
            U256::from(1u64),
            0,
        );
        assert_eq!(stats.current_tier, u64::MAX);
        assert!(!stats.fallback);

        let max_everything =
            ContractStatsResponse::derive(U256::MAX, U256::MAX, U256::MAX, 0);
        assert_eq!(max_everything.current_tier, 1);
    }

    #[test]
    fn fallback_is_well_formed() {
        let stats = ContractStatsResponse::fallback();
        assert!(stats.fallback);
        assert_eq!(stats.current_multiplier, 100);
        assert_eq!(stats.total_claimed, "0");
    }
}
