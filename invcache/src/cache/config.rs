//! Configuration for a cache slot

use serde::{Deserialize, Serialize};

/// Configuration for a [`CacheSlot`](crate::cache::CacheSlot)
///
/// None of these settings change what `solve` returns. They only control
/// bookkeeping and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Collect hit/miss/computation counters
    pub enable_metrics: bool,

    /// Record options and timing alongside each cached solution
    pub track_metadata: bool,

    /// Emit a diagnostic when a hit is served for different options than the
    /// ones the solution was computed with
    pub report_option_drift: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            track_metadata: true,
            report_option_drift: true,
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Configuration with every piece of bookkeeping turned off
    pub fn minimal() -> Self {
        Self {
            enable_metrics: false,
            track_metadata: false,
            report_option_drift: false,
        }
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    enable_metrics: Option<bool>,
    track_metadata: Option<bool>,
    report_option_drift: Option<bool>,
}

impl CacheConfigBuilder {
    /// Enable or disable metrics collection
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = Some(enable);
        self
    }

    /// Enable or disable per-solution metadata
    pub fn track_metadata(mut self, enable: bool) -> Self {
        self.track_metadata = Some(enable);
        self
    }

    /// Enable or disable option drift diagnostics
    pub fn report_option_drift(mut self, enable: bool) -> Self {
        self.report_option_drift = Some(enable);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            enable_metrics: self.enable_metrics.unwrap_or(defaults.enable_metrics),
            track_metadata: self.track_metadata.unwrap_or(defaults.track_metadata),
            report_option_drift: self
                .report_option_drift
                .unwrap_or(defaults.report_option_drift),
        }
    }
}
