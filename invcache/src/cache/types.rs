//! Core type definitions for the cache system

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense row-major matrix of `f64`, used for both inputs and inverses
pub type Matrix = Array2<f64>;

/// Whether a slot currently holds a valid solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotState {
    /// No cached solution; the next solve computes
    Empty,

    /// A solution for the current input is cached
    Cached,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotState::Empty => write!(f, "empty"),
            SlotState::Cached => write!(f, "cached"),
        }
    }
}

/// Counters describing how a slot has been used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Solves answered from the cached solution
    pub hits: u64,

    /// Solves that found no cached solution
    pub misses: u64,

    /// Successful collaborator invocations
    pub computations: u64,

    /// Failed collaborator invocations
    pub failures: u64,

    /// Input replacements and explicit invalidations
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Calculate miss rate as a percentage
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }

    /// Total number of solve requests seen
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, computations: {}, failures: {}, invalidations: {} }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.computations,
            self.failures,
            self.invalidations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };

        assert_eq!(stats.hit_rate(), 80.0);
        assert_eq!(stats.miss_rate(), 20.0);
        assert_eq!(stats.total_requests(), 100);
    }

    #[test]
    fn test_cache_stats_zero_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 100.0);
    }

    #[test]
    fn test_cache_stats_display() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            computations: 1,
            failures: 0,
            invalidations: 2,
        };

        let display = format!("{}", stats);
        assert!(display.contains("hits: 3"));
        assert!(display.contains("hit_rate: 75.00%"));
        assert!(display.contains("invalidations: 2"));
    }

    #[test]
    fn test_slot_state_display() {
        assert_eq!(SlotState::Empty.to_string(), "empty");
        assert_eq!(SlotState::Cached.to_string(), "cached");
    }
}
