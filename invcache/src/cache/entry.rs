//! Cached solution with bookkeeping metadata

use crate::cache::types::Matrix;
use crate::invert::InvertOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An inverse stored in a slot, plus how and when it was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSolution {
    /// The cached inverse
    pub value: Matrix,

    /// Solution metadata
    pub metadata: SolutionMetadata,
}

impl CachedSolution {
    /// Wrap a freshly computed inverse
    pub fn new(value: Matrix, generation: u64) -> Self {
        let now = Utc::now();

        Self {
            value,
            metadata: SolutionMetadata {
                computed_at: now,
                accessed_at: now,
                access_count: 0,
                generation,
                options: None,
                compute_time: None,
            },
        }
    }

    /// Record the options the collaborator was called with
    pub fn with_options(mut self, options: InvertOptions) -> Self {
        self.metadata.options = Some(options);
        self
    }

    /// Record how long the computation took
    pub fn with_compute_time(mut self, elapsed: Duration) -> Self {
        self.metadata.compute_time = Some(elapsed);
        self
    }

    /// Mark the solution as read (updates access time and count)
    pub fn mark_accessed(&mut self) {
        self.metadata.accessed_at = Utc::now();
        self.metadata.access_count += 1;
    }

    /// Get the age of the solution
    pub fn age(&self) -> Duration {
        (Utc::now() - self.metadata.computed_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }

    /// Whether this solution was filled with options other than `options`.
    ///
    /// Solutions stored without recorded options never report drift.
    pub fn options_differ(&self, options: &InvertOptions) -> bool {
        self.metadata
            .options
            .as_ref()
            .is_some_and(|stored| stored != options)
    }
}

/// Metadata associated with a cached solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// When the solution was stored
    pub computed_at: DateTime<Utc>,

    /// Last time a solve returned it
    pub accessed_at: DateTime<Utc>,

    /// Number of cache hits served by this solution
    pub access_count: u64,

    /// Slot generation the solution belongs to
    pub generation: u64,

    /// Options in effect when the solution was computed
    pub options: Option<InvertOptions>,

    /// Wall time spent in the collaborator
    pub compute_time: Option<Duration>,
}
