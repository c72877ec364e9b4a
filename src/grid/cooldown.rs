//! Per-key debounce.
//!
//! A key is "cold" when it has never been approved or when at least the
//! cooldown has passed since its last approval. Checking a cold key approves
//! it in the same call.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use super::clock::{Clock, MonotonicClock};

/// Default cooldown between two approvals of the same key.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct CooldownFilter<K, C = MonotonicClock> {
    cooldown: Duration,
    clock: C,
    approved_at: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Clone> CooldownFilter<K, MonotonicClock> {
    pub fn new(cooldown: Duration) -> Self {
        Self::with_clock(cooldown, MonotonicClock)
    }
}

impl<K: Eq + Hash + Clone, C: Clock> CooldownFilter<K, C> {
    pub fn with_clock(cooldown: Duration, clock: C) -> Self {
        Self {
            cooldown,
            clock,
            approved_at: HashMap::new(),
        }
    }

    /// Returns true and records the current time if `key` is cold.
    /// Returns false and leaves the record untouched otherwise.
    pub fn is_cold_enough(&mut self, key: &K) -> bool {
        let now = self.clock.now();

        if let Some(last) = self.approved_at.get(key) {
            if now.saturating_duration_since(*last) < self.cooldown {
                return false;
            }
        }

        self.approved_at.insert(key.clone(), now);
        true
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Number of keys ever approved.
    pub fn len(&self) -> usize {
        self.approved_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approved_at.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for CooldownFilter<K, MonotonicClock> {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
