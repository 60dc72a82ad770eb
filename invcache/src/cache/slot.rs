//! Single-entry cache slot holding an input matrix and its inverse

use crate::cache::{
    config::CacheConfig,
    entry::CachedSolution,
    invalidation::{InvalidationEvent, InvalidationReason},
    types::{CacheStats, Matrix, SlotState},
};
use crate::invert::InvertOptions;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Owned container for one input matrix and, optionally, its cached inverse
///
/// The slot guarantees that a cached solution always belongs to the current
/// input:
/// - Every input replacement drops the cached solution first
/// - A solution is only present after a computation since the last replacement
/// - The input is only reachable through `&` views, so it cannot be mutated
///   without going through [`CacheSlot::set_input`]
///
/// An unset input is `None`, which is distinct from a valid 0x0 matrix.
#[derive(Debug)]
pub struct CacheSlot {
    /// Slot identity used in diagnostics
    id: Uuid,

    /// Current input, if any
    input: Option<Matrix>,

    /// Cached inverse of `input`
    solution: Option<CachedSolution>,

    /// Bumped on every invalidation
    generation: u64,

    /// Usage counters
    stats: CacheStats,

    /// Most recent invalidation
    last_invalidation: Option<InvalidationEvent>,

    /// Slot configuration
    config: CacheConfig,
}

impl CacheSlot {
    /// Create a slot for `input` with no cached solution
    pub fn new(input: Matrix) -> Self {
        Self::with_config(Some(input), CacheConfig::default())
    }

    /// Create a slot with no input yet
    ///
    /// [`set_input`](Self::set_input) must be called before the first solve.
    pub fn unset() -> Self {
        Self::with_config(None, CacheConfig::default())
    }

    /// Create a slot with a custom configuration
    pub fn with_config(input: Option<Matrix>, config: CacheConfig) -> Self {
        let id = Uuid::new_v4();
        debug!(slot_id = %id, has_input = input.is_some(), "Creating cache slot");

        Self {
            id,
            input,
            solution: None,
            generation: 0,
            stats: CacheStats::default(),
            last_invalidation: None,
            config,
        }
    }

    /// Current input, or `None` if the slot is unset
    pub fn get_input(&self) -> Option<&Matrix> {
        self.input.as_ref()
    }

    /// Replace the input and drop any cached solution
    ///
    /// The solution is dropped even if `input` equals the previous value.
    pub fn set_input(&mut self, input: Matrix) {
        let context = format!(
            "{} -> {}",
            shape_label(self.input.as_ref()),
            shape_label(Some(&input))
        );
        self.invalidate_with(InvalidationReason::InputReplaced, Some(context));
        self.input = Some(input);
    }

    /// Return the slot to the unset state, dropping any cached solution
    pub fn clear_input(&mut self) -> Option<Matrix> {
        let context = format!("{} -> unset", shape_label(self.input.as_ref()));
        self.invalidate_with(InvalidationReason::InputCleared, Some(context));
        self.input.take()
    }

    /// Cached solution for the current input, if one is present
    pub fn get_solution(&self) -> Option<&Matrix> {
        self.solution.as_ref().map(|s| &s.value)
    }

    /// Store `solution` as the inverse of the current input
    ///
    /// The value is trusted as-is; it is not checked against the input.
    pub fn set_solution(&mut self, solution: Matrix) {
        debug!(slot_id = %self.id, generation = self.generation, "Storing solution");
        self.solution = Some(CachedSolution::new(solution, self.generation));
    }

    /// Drop the cached solution but keep the input
    pub fn invalidate(&mut self) {
        self.invalidate_with(InvalidationReason::Manual, None);
    }

    /// Cached solution together with its metadata
    pub fn cached(&self) -> Option<&CachedSolution> {
        self.solution.as_ref()
    }

    /// Current state of the slot
    pub fn state(&self) -> SlotState {
        if self.solution.is_some() {
            SlotState::Cached
        } else {
            SlotState::Empty
        }
    }

    /// Whether a solution is cached
    pub fn is_cached(&self) -> bool {
        self.solution.is_some()
    }

    /// Whether an input has been set
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Slot identity
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of invalidations since the slot was created
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Usage counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero all usage counters
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Most recent invalidation, if any
    pub fn last_invalidation(&self) -> Option<&InvalidationEvent> {
        self.last_invalidation.as_ref()
    }

    /// Slot configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Internal: count a hit and return the cached solution
    ///
    /// Only access bookkeeping changes; the cached value and the slot state
    /// are left as they were.
    pub(crate) fn take_hit(&mut self) -> Option<&CachedSolution> {
        let solution = self.solution.as_mut()?;
        solution.mark_accessed();
        if self.config.enable_metrics {
            self.stats.hits += 1;
        }
        Some(&*solution)
    }

    /// Internal: count a miss
    pub(crate) fn record_miss(&mut self) {
        if self.config.enable_metrics {
            self.stats.misses += 1;
        }
    }

    /// Internal: count a collaborator failure
    pub(crate) fn record_failure(&mut self) {
        if self.config.enable_metrics {
            self.stats.failures += 1;
        }
    }

    /// Internal: store a freshly computed solution with its metadata
    pub(crate) fn store_computed(
        &mut self,
        value: Matrix,
        options: &InvertOptions,
        elapsed: Duration,
    ) {
        let mut solution = CachedSolution::new(value, self.generation);
        if self.config.track_metadata {
            solution = solution
                .with_options(options.clone())
                .with_compute_time(elapsed);
        }
        if self.config.enable_metrics {
            self.stats.computations += 1;
        }
        self.solution = Some(solution);
    }

    fn invalidate_with(&mut self, reason: InvalidationReason, context: Option<String>) {
        let discarded = self.solution.take().is_some();
        self.generation += 1;
        if self.config.enable_metrics {
            self.stats.invalidations += 1;
        }

        debug!(
            slot_id = %self.id,
            generation = self.generation,
            discarded,
            context = context.as_deref().unwrap_or(""),
            "Cache invalidated ({})",
            reason
        );

        let mut event = InvalidationEvent::new(reason, self.generation, discarded);
        if let Some(context) = context {
            event = event.with_context(context);
        }
        self.last_invalidation = Some(event);
    }
}

/// `RxC` for a matrix, `unset` for a missing input
fn shape_label(input: Option<&Matrix>) -> String {
    match input {
        Some(m) => format!("{}x{}", m.nrows(), m.ncols()),
        None => "unset".to_string(),
    }
}

impl Default for CacheSlot {
    fn default() -> Self {
        Self::unset()
    }
}

impl From<Matrix> for CacheSlot {
    fn from(input: Matrix) -> Self {
        Self::new(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_slot_is_empty() {
        let slot = CacheSlot::new(array![[2.0, 0.0], [0.0, 2.0]]);

        assert_eq!(slot.state(), SlotState::Empty);
        assert!(slot.has_input());
        assert!(slot.get_solution().is_none());
        assert_eq!(slot.generation(), 0);
        assert!(slot.last_invalidation().is_none());
    }

    #[test]
    fn test_unset_slot() {
        let slot = CacheSlot::unset();
        assert!(!slot.has_input());
        assert!(slot.get_input().is_none());
        assert_eq!(slot.state(), SlotState::Empty);

        let default_slot = CacheSlot::default();
        assert!(!default_slot.has_input());
        assert_ne!(slot.id(), default_slot.id());
    }

    #[test]
    fn test_empty_matrix_is_not_unset() {
        let slot = CacheSlot::new(Matrix::zeros((0, 0)));
        assert!(slot.has_input());
        assert_eq!(slot.get_input().map(|m| m.dim()), Some((0, 0)));
    }

    #[test]
    fn test_set_solution_then_get() {
        let mut slot = CacheSlot::new(Matrix::eye(2));
        slot.set_solution(Matrix::eye(2));

        assert_eq!(slot.state(), SlotState::Cached);
        assert_eq!(slot.get_solution(), Some(&Matrix::eye(2)));
        assert_eq!(slot.cached().map(|s| s.metadata.generation), Some(0));
    }

    #[test]
    fn test_set_input_clears_solution() {
        let mut slot = CacheSlot::new(Matrix::eye(2));
        slot.set_solution(Matrix::eye(2));

        slot.set_input(array![[2.0, 0.0], [0.0, 2.0]]);

        assert!(slot.get_solution().is_none());
        assert_eq!(slot.get_input(), Some(&array![[2.0, 0.0], [0.0, 2.0]]));
        assert_eq!(slot.generation(), 1);

        let event = slot.last_invalidation().unwrap();
        assert_eq!(event.reason, InvalidationReason::InputReplaced);
        assert!(event.discarded_solution);
        assert_eq!(event.context.as_deref(), Some("2x2 -> 2x2"));
    }

    #[test]
    fn test_invalidation_context_describes_shapes() {
        let mut slot = CacheSlot::unset();

        slot.set_input(Matrix::eye(2));
        assert_eq!(
            slot.last_invalidation().and_then(|e| e.context.as_deref()),
            Some("unset -> 2x2")
        );

        slot.set_input(Matrix::zeros((3, 4)));
        assert_eq!(
            slot.last_invalidation().and_then(|e| e.context.as_deref()),
            Some("2x2 -> 3x4")
        );

        slot.clear_input();
        assert_eq!(
            slot.last_invalidation().and_then(|e| e.context.as_deref()),
            Some("3x4 -> unset")
        );

        slot.invalidate();
        assert!(slot.last_invalidation().unwrap().context.is_none());
    }

    #[test]
    fn test_set_same_input_still_clears() {
        let mut slot = CacheSlot::new(Matrix::eye(2));
        slot.set_solution(Matrix::eye(2));

        slot.set_input(Matrix::eye(2));
        assert_eq!(slot.state(), SlotState::Empty);

        slot.set_input(Matrix::eye(2));
        assert_eq!(slot.state(), SlotState::Empty);
        assert_eq!(slot.generation(), 2);
        assert!(!slot.last_invalidation().unwrap().discarded_solution);
        assert_eq!(slot.stats().invalidations, 2);
    }

    #[test]
    fn test_clear_input() {
        let mut slot = CacheSlot::new(Matrix::eye(3));
        slot.set_solution(Matrix::eye(3));

        let previous = slot.clear_input();

        assert_eq!(previous, Some(Matrix::eye(3)));
        assert!(!slot.has_input());
        assert!(!slot.is_cached());
        assert_eq!(
            slot.last_invalidation().map(|e| e.reason),
            Some(InvalidationReason::InputCleared)
        );
    }

    #[test]
    fn test_manual_invalidate_keeps_input() {
        let mut slot = CacheSlot::new(Matrix::eye(2));
        slot.set_solution(Matrix::eye(2));

        slot.invalidate();

        assert!(slot.has_input());
        assert!(!slot.is_cached());
        assert_eq!(
            slot.last_invalidation().map(|e| e.reason),
            Some(InvalidationReason::Manual)
        );
    }

    #[test]
    fn test_metrics_disabled() {
        let mut slot = CacheSlot::with_config(Some(Matrix::eye(2)), CacheConfig::minimal());
        slot.set_input(Matrix::eye(2));
        slot.record_miss();

        assert_eq!(slot.stats(), &CacheStats::default());
    }

    #[test]
    fn test_store_computed_tracks_metadata() {
        let mut slot = CacheSlot::new(Matrix::eye(2));
        slot.store_computed(Matrix::eye(2), &InvertOptions::strict(), Duration::from_millis(3));

        let cached = slot.cached().unwrap();
        assert_eq!(cached.metadata.options, Some(InvertOptions::strict()));
        assert_eq!(cached.metadata.compute_time, Some(Duration::from_millis(3)));
        assert_eq!(slot.stats().computations, 1);

        let hit = slot.take_hit().unwrap();
        assert_eq!(hit.metadata.access_count, 1);
        assert_eq!(slot.stats().hits, 1);
    }

    #[test]
    fn test_reset_stats() {
        let mut slot = CacheSlot::new(Matrix::eye(2));
        slot.record_miss();
        slot.record_failure();
        slot.reset_stats();
        assert_eq!(slot.stats().total_requests(), 0);
        assert_eq!(slot.stats().failures, 0);
    }
}
