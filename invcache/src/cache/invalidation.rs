//! Cache invalidation records
//!
//! A slot's solution is only ever dropped by the slot itself: when the input
//! is replaced or cleared, or when the caller asks for it explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason for cache invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationReason {
    /// A new input matrix was set
    InputReplaced,

    /// The input was reset to the unset state
    InputCleared,

    /// Manual invalidation, input kept
    Manual,
}

impl std::fmt::Display for InvalidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidationReason::InputReplaced => write!(f, "input replaced"),
            InvalidationReason::InputCleared => write!(f, "input cleared"),
            InvalidationReason::Manual => write!(f, "manual invalidation"),
        }
    }
}

/// Event for cache invalidation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationEvent {
    /// Reason for invalidation
    pub reason: InvalidationReason,

    /// When the invalidation occurred
    pub timestamp: DateTime<Utc>,

    /// Slot generation after the invalidation
    pub generation: u64,

    /// Whether a cached solution was actually dropped
    pub discarded_solution: bool,

    /// Additional context
    pub context: Option<String>,
}

impl InvalidationEvent {
    /// Create a new invalidation event
    pub fn new(reason: InvalidationReason, generation: u64, discarded_solution: bool) -> Self {
        Self {
            reason,
            timestamp: Utc::now(),
            generation,
            discarded_solution,
            context: None,
        }
    }

    /// Add context to the event
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
