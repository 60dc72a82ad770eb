//! Read-through solve over a cache slot

use crate::cache::{slot::CacheSlot, types::Matrix};
use crate::error::{InvCacheError, Result};
use crate::invert::{GaussJordan, Inverter, InvertOptions};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Return the inverse of the slot's input, computing it only on a miss
///
/// 1. A cached solution is returned as-is (cache hit).
/// 2. Otherwise `inverter` is called with the current input and `options`.
/// 3. A failure is returned unchanged and nothing is stored.
/// 4. A success is stored in the slot and returned.
///
/// `options` are forwarded to the collaborator but are not part of the cache
/// key: a hit returns the solution computed with whatever options were in
/// effect when the slot was filled.
///
/// Every call emits exactly one `tracing` event carrying a `cache` field of
/// either `"hit"` or `"miss"`.
pub fn solve<I>(slot: &mut CacheSlot, inverter: &I, options: &InvertOptions) -> Result<Matrix>
where
    I: Inverter + ?Sized,
{
    let slot_id = slot.id();
    let report_drift = slot.config().report_option_drift;

    if let Some(cached) = slot.take_hit() {
        debug!(
            slot_id = %slot_id,
            cache = "hit",
            access_count = cached.metadata.access_count,
            "Cache hit, returning stored inverse"
        );
        if report_drift && cached.options_differ(options) {
            debug!(
                slot_id = %slot_id,
                "Cached inverse was computed with different options, returning it unchanged"
            );
        }
        return Ok(cached.value.clone());
    }

    slot.record_miss();

    let Some(input) = slot.get_input() else {
        warn!(slot_id = %slot_id, cache = "miss", "Cache miss on a slot with no input");
        return Err(InvCacheError::MissingInput);
    };

    let (rows, cols) = input.dim();
    debug!(
        slot_id = %slot_id,
        cache = "miss",
        rows,
        cols,
        "Cache miss, computing inverse"
    );

    let started = Instant::now();
    match inverter.invert(input, options) {
        Ok(inverse) => {
            let elapsed = started.elapsed();
            debug!(
                slot_id = %slot_id,
                elapsed_us = saturating_micros(elapsed),
                "Inverse computed"
            );
            slot.store_computed(inverse.clone(), options, elapsed);
            Ok(inverse)
        }
        Err(e) => {
            warn!(slot_id = %slot_id, "Inversion failed: {}", e);
            slot.record_failure();
            Err(e.into())
        }
    }
}

fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// Read-through solver bound to one inversion collaborator
///
/// Holds no cache state of its own; all state lives in the [`CacheSlot`]
/// passed to each call.
#[derive(Debug, Clone, Default)]
pub struct CachedSolver<I = GaussJordan> {
    inverter: I,
}

impl<I: Inverter> CachedSolver<I> {
    /// Create a solver using `inverter` for cache misses
    pub fn new(inverter: I) -> Self {
        Self { inverter }
    }

    /// The wrapped collaborator
    pub fn inverter(&self) -> &I {
        &self.inverter
    }

    /// See [`solve`]
    pub fn solve(&self, slot: &mut CacheSlot, options: &InvertOptions) -> Result<Matrix> {
        solve(slot, &self.inverter, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::types::SlotState;
    use crate::invert::InversionError;
    use ndarray::array;
    use std::cell::Cell;

    #[test]
    fn test_miss_then_hit() {
        let calls = Cell::new(0);
        let inverter = |m: &Matrix, o: &InvertOptions| {
            calls.set(calls.get() + 1);
            GaussJordan.invert(m, o)
        };

        let mut slot = CacheSlot::new(array![[4.0, 0.0], [0.0, 5.0]]);
        let options = InvertOptions::default();

        let first = solve(&mut slot, &inverter, &options).unwrap();
        let second = solve(&mut slot, &inverter, &options).unwrap();

        assert_eq!(first, array![[0.25, 0.0], [0.0, 0.2]]);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);

        let stats = slot.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.computations, 1);
        assert_eq!(slot.cached().unwrap().metadata.access_count, 1);
    }

    #[test]
    fn test_hit_only_touches_bookkeeping() {
        let mut slot = CacheSlot::new(array![[2.0, 1.0], [1.0, 3.0]]);
        let solver: CachedSolver = CachedSolver::default();
        solver.solve(&mut slot, &InvertOptions::default()).unwrap();

        let before = slot.cached().unwrap().clone();
        let generation = slot.generation();

        for _ in 0..3 {
            solver.solve(&mut slot, &InvertOptions::default()).unwrap();
        }

        let after = slot.cached().unwrap();
        assert_eq!(after.value, before.value);
        assert_eq!(after.metadata.computed_at, before.metadata.computed_at);
        assert_eq!(after.metadata.generation, before.metadata.generation);
        assert_eq!(after.metadata.access_count, 3);
        assert_eq!(slot.generation(), generation);
        assert_eq!(slot.state(), SlotState::Cached);
    }

    #[test]
    fn test_missing_input_skips_collaborator() {
        let calls = Cell::new(0);
        let inverter = |m: &Matrix, _: &InvertOptions| -> std::result::Result<Matrix, InversionError> {
            calls.set(calls.get() + 1);
            Ok(m.clone())
        };

        let mut slot = CacheSlot::unset();
        let err = solve(&mut slot, &inverter, &InvertOptions::default()).unwrap_err();

        assert!(matches!(err, InvCacheError::MissingInput));
        assert_eq!(calls.get(), 0);
        assert_eq!(slot.state(), SlotState::Empty);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let mut slot = CacheSlot::new(array![[1.0, 2.0], [2.0, 4.0]]);
        let solver: CachedSolver = CachedSolver::default();

        let err = solver
            .solve(&mut slot, &InvertOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            InvCacheError::Computation(InversionError::Singular { .. })
        ));
        assert_eq!(slot.state(), SlotState::Empty);
        assert!(slot.get_solution().is_none());
        assert_eq!(slot.stats().failures, 1);
        assert_eq!(slot.stats().computations, 0);
    }

    #[test]
    fn test_hit_ignores_new_options() {
        let mut slot = CacheSlot::new(array![[1e-9, 0.0], [0.0, 1.0]]);
        let solver = CachedSolver::new(GaussJordan);

        let lenient = solver.solve(&mut slot, &InvertOptions::default()).unwrap();

        // strict() would reject this matrix, but the cached inverse wins
        let strict = solver.solve(&mut slot, &InvertOptions::strict()).unwrap();

        assert_eq!(lenient, strict);
        assert!(slot
            .cached()
            .unwrap()
            .options_differ(&InvertOptions::strict()));
    }

    #[test]
    fn test_saturating_micros() {
        assert_eq!(saturating_micros(Duration::from_millis(3)), 3_000);
        assert_eq!(saturating_micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_solver_exposes_inverter() {
        let solver = CachedSolver::new(GaussJordan);
        let inv = solver
            .inverter()
            .invert(&Matrix::eye(2), &InvertOptions::default())
            .unwrap();
        assert_eq!(inv, Matrix::eye(2));
    }
}
