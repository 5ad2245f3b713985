//! Time utilities for the simulation loop

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 60; // 60 frames per second
pub const TICK_DURATION_MICROS: u64 = 1_000_000 / SIMULATION_TPS as u64;

/// A simple timer for measuring durations
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_millis_is_monotonic_enough() {
        let a = unix_millis();
        let b = unix_millis();
        assert!(b >= a);
    }

    #[test]
    fn test_tick_duration_matches_tps() {
        assert_eq!(TICK_DURATION_MICROS * SIMULATION_TPS as u64, 1_000_000);
    }
}
