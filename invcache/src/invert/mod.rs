//! Inversion collaborator
//!
//! The cache layer never inverts anything itself. It hands the current input
//! to an [`Inverter`] and stores whatever comes back. Shape, rank and
//! finiteness checks belong here, not in the cache.
//!
//! Any `Fn(&Matrix, &InvertOptions) -> Result<Matrix, InversionError>`
//! closure is an `Inverter`, which makes it easy to count calls or inject
//! failures in tests:
//!
//! ```rust
//! use invcache::invert::{Inverter, InvertOptions, InversionError};
//! use invcache::Matrix;
//!
//! let transpose = |m: &Matrix, _: &InvertOptions| -> Result<Matrix, InversionError> {
//!     Ok(m.t().to_owned())
//! };
//! let m = ndarray::array![[0.0, 1.0], [1.0, 0.0]];
//! assert_eq!(transpose.invert(&m, &InvertOptions::default()).unwrap(), m);
//! ```

pub mod gauss_jordan;
pub mod options;

pub use gauss_jordan::GaussJordan;
pub use options::{InvertOptions, InvertOptionsBuilder, PivotStrategy};

use crate::cache::types::Matrix;
use thiserror::Error;

/// Errors raised by an inversion collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InversionError {
    /// Only square matrices have inverses
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// No usable pivot was found for a column
    #[error("Matrix is singular: pivot {pivot:e} in column {column} is below tolerance")]
    Singular { column: usize, pivot: f64 },

    /// NaN or infinite entry in the input
    #[error("Non-finite entry at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    /// The options handed to the collaborator are unusable
    #[error("Invalid inversion options: {0}")]
    InvalidOptions(String),
}

/// A deterministic matrix inversion routine
pub trait Inverter {
    /// Compute the inverse of `matrix`
    fn invert(&self, matrix: &Matrix, options: &InvertOptions) -> Result<Matrix, InversionError>;
}

impl<F> Inverter for F
where
    F: Fn(&Matrix, &InvertOptions) -> Result<Matrix, InversionError>,
{
    fn invert(&self, matrix: &Matrix, options: &InvertOptions) -> Result<Matrix, InversionError> {
        self(matrix, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::cell::Cell;

    #[test]
    fn test_closure_inverter() {
        let calls = Cell::new(0);
        let inverter = |m: &Matrix, _: &InvertOptions| -> Result<Matrix, InversionError> {
            calls.set(calls.get() + 1);
            Ok(m.clone())
        };

        let m = array![[1.0, 0.0], [0.0, 1.0]];
        let result = inverter.invert(&m, &InvertOptions::default()).unwrap();

        assert_eq!(result, m);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_inversion_error_display() {
        let err = InversionError::NotSquare { rows: 3, cols: 2 };
        assert_eq!(err.to_string(), "Matrix must be square, got 3x2");

        let err = InversionError::Singular { column: 1, pivot: 0.0 };
        assert!(err.to_string().contains("column 1"));

        let err = InversionError::NonFinite { row: 0, col: 2 };
        assert!(err.to_string().contains("(0, 2)"));
    }
}
