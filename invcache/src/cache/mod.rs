//! # Single-Slot Inverse Cache
//!
//! This module memoizes a matrix inverse against the matrix it was computed
//! from.
//!
//! ## Features
//!
//! - **Read-Through Solve**: `solve` returns the stored inverse or computes,
//!   stores and returns a fresh one
//! - **Invalidation on Write**: replacing the input always drops the cached
//!   inverse, even when the new input equals the old one
//! - **Failure Isolation**: collaborator errors are returned unchanged and
//!   never stored
//! - **Diagnostics**: hits, misses and invalidations are reported through
//!   `tracing` and counted in [`CacheStats`]
//!
//! ## State Machine
//!
//! Each slot cycles between two states for its whole lifetime:
//! - `Empty` on construction and after every `set_input`
//! - `Cached` after a successful solve
//!
//! ## Example
//!
//! ```rust
//! use invcache::cache::{CacheSlot, CachedSolver};
//! use invcache::invert::InvertOptions;
//! use ndarray::array;
//!
//! # fn example() -> invcache::Result<()> {
//! let solver: CachedSolver = CachedSolver::default();
//! let mut slot = CacheSlot::new(array![[2.0, 0.0], [0.0, 2.0]]);
//!
//! // Computes and stores
//! let inverse = solver.solve(&mut slot, &InvertOptions::default())?;
//! assert_eq!(inverse, array![[0.5, 0.0], [0.0, 0.5]]);
//!
//! // Served from the slot
//! solver.solve(&mut slot, &InvertOptions::default())?;
//! assert_eq!(slot.stats().hits, 1);
//!
//! // New input, next solve recomputes
//! slot.set_input(array![[1.0, 0.0], [0.0, 1.0]]);
//! assert!(!slot.is_cached());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod entry;
pub mod invalidation;
pub mod slot;
pub mod solver;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::{CachedSolution, SolutionMetadata};
pub use invalidation::{InvalidationEvent, InvalidationReason};
pub use slot::CacheSlot;
pub use solver::{solve, CachedSolver};
pub use types::{CacheStats, Matrix, SlotState};
