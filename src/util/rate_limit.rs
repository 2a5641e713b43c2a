//! Rate limiting utilities

use dashmap::DashMap;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use uuid::Uuid;

/// Rate limiter type alias
pub type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Create a rate limiter with the specified requests per second
pub fn create_limiter(requests_per_second: u32) -> Arc<Limiter> {
    let quota = Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Attack requests per second allowed for one player
pub const ATTACK_RATE_LIMIT: u32 = 5;

/// Per-player rate limiter state
#[derive(Clone)]
pub struct PlayerRateLimiter {
    attack_limiter: Arc<Limiter>,
}

impl PlayerRateLimiter {
    pub fn new() -> Self {
        Self {
            attack_limiter: create_limiter(ATTACK_RATE_LIMIT),
        }
    }

    /// Check if an attack request is allowed (returns true if allowed)
    pub fn check_attack(&self) -> bool {
        self.attack_limiter.check().is_ok()
    }
}

impl Default for PlayerRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rate limiters keyed by player, created on first use
#[derive(Clone, Default)]
pub struct PlayerLimiters {
    players: Arc<DashMap<Uuid, PlayerRateLimiter>>,
}

impl PlayerLimiters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `player` may submit another attack right now
    pub fn check_attack(&self, player: Uuid) -> bool {
        self.players
            .entry(player)
            .or_default()
            .check_attack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_beyond_quota_is_limited() {
        let limiters = PlayerLimiters::new();
        let player = Uuid::new_v4();

        let allowed = (0..ATTACK_RATE_LIMIT * 2)
            .filter(|_| limiters.check_attack(player))
            .count();
        assert!(allowed >= 1);
        assert!(allowed < (ATTACK_RATE_LIMIT * 2) as usize);
    }

    #[test]
    fn players_are_limited_independently() {
        let limiters = PlayerLimiters::new();
        let busy = Uuid::new_v4();
        while limiters.check_attack(busy) {}
        assert!(limiters.check_attack(Uuid::new_v4()));
    }
}
