//! # invcache
//!
//! Memoizes the inverse of a matrix that changes only occasionally.
//!
//! ## Features
//!
//! - Single-slot cache tied to the identity of its input
//! - Invalidation on every input replacement
//! - Pluggable inversion collaborator through the [`Inverter`] trait
//! - Default Gauss-Jordan collaborator with partial pivoting
//! - Structured diagnostics via `tracing`
//!
//! ## Usage
//!
//! ```rust
//! use invcache::{solve, CacheSlot, GaussJordan, InvertOptions};
//! use ndarray::array;
//!
//! # fn main() -> invcache::Result<()> {
//! let mut slot = CacheSlot::new(array![[2.0, 0.0], [0.0, 2.0]]);
//! let options = InvertOptions::default();
//!
//! let first = solve(&mut slot, &GaussJordan, &options)?;
//! let again = solve(&mut slot, &GaussJordan, &options)?;
//! assert_eq!(first, again);
//! assert_eq!(slot.stats().computations, 1);
//!
//! slot.set_input(array![[1.0, 0.0], [0.0, 1.0]]);
//! let identity = solve(&mut slot, &GaussJordan, &options)?;
//! assert_eq!(identity, array![[1.0, 0.0], [0.0, 1.0]]);
//! assert_eq!(slot.stats().computations, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Collaborators
//!
//! Any closure with the right signature can stand in for the inverter:
//!
//! ```rust
//! use invcache::{CacheSlot, CachedSolver, InversionError, InvertOptions, Matrix};
//!
//! let reject_all = |_: &Matrix, _: &InvertOptions| -> Result<Matrix, InversionError> {
//!     Err(InversionError::Singular { column: 0, pivot: 0.0 })
//! };
//! let solver = CachedSolver::new(reject_all);
//! let mut slot = CacheSlot::new(Matrix::eye(2));
//!
//! assert!(solver.solve(&mut slot, &InvertOptions::default()).is_err());
//! assert!(!slot.is_cached());
//! ```

pub mod cache;
pub mod error;
pub mod invert;

// Re-export main types for convenience
pub use cache::{
    solve, CacheConfig, CacheConfigBuilder, CacheSlot, CacheStats, CachedSolution, CachedSolver,
    InvalidationEvent, InvalidationReason, Matrix, SlotState, SolutionMetadata,
};
pub use error::{InvCacheError, Result};
pub use invert::{
    GaussJordan, InversionError, Inverter, InvertOptions, InvertOptionsBuilder, PivotStrategy,
};
