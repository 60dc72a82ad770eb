//! Gauss-Jordan elimination with optional partial pivoting

use crate::cache::types::Matrix;
use crate::invert::{InversionError, Inverter, InvertOptions, PivotStrategy};

/// Default inversion collaborator
///
/// Reduces `[A | I]` to `[I | A^-1]` row by row. With
/// [`PivotStrategy::Partial`] the row with the largest magnitude in the
/// current column is swapped into place before each step.
///
/// [`InvertOptions::pivot_tolerance`] is relative: a pivot is rejected when
/// its magnitude is at or below `pivot_tolerance * max |a_ij|`, so uniformly
/// scaling the input never changes whether it is invertible.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussJordan;

impl Inverter for GaussJordan {
    fn invert(&self, matrix: &Matrix, options: &InvertOptions) -> Result<Matrix, InversionError> {
        options.validate().map_err(InversionError::InvalidOptions)?;

        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(InversionError::NotSquare { rows, cols });
        }

        if options.check_finite {
            if let Some(((row, col), _)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
                return Err(InversionError::NonFinite { row, col });
            }
        }

        let n = rows;
        let threshold = options.pivot_tolerance * max_abs_entry(matrix);
        let mut a = matrix.to_owned();
        let mut inv = Matrix::eye(n);

        for k in 0..n {
            let pivot_row = match options.pivoting {
                PivotStrategy::Partial => largest_in_column(&a, k),
                PivotStrategy::Diagonal => k,
            };
            if pivot_row != k {
                swap_rows(&mut a, k, pivot_row);
                swap_rows(&mut inv, k, pivot_row);
            }

            let pivot = a[[k, k]];
            // Negated so a NaN pivot is also rejected
            if !(pivot.abs() > threshold) {
                return Err(InversionError::Singular { column: k, pivot });
            }

            a.row_mut(k).mapv_inplace(|v| v / pivot);
            inv.row_mut(k).mapv_inplace(|v| v / pivot);

            let a_pivot = a.row(k).to_owned();
            let inv_pivot = inv.row(k).to_owned();
            for i in 0..n {
                if i == k {
                    continue;
                }
                let factor = a[[i, k]];
                if factor == 0.0 {
                    continue;
                }
                a.row_mut(i).scaled_add(-factor, &a_pivot);
                inv.row_mut(i).scaled_add(-factor, &inv_pivot);
            }
        }

        Ok(inv)
    }
}

/// Largest entry magnitude, ignoring NaN
fn max_abs_entry(m: &Matrix) -> f64 {
    m.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// Row index in `k..n` with the largest magnitude in column `k`
fn largest_in_column(m: &Matrix, k: usize) -> usize {
    let mut max_idx = k;
    let mut max_val = m[[k, k]].abs();
    for i in (k + 1)..m.nrows() {
        let val = m[[i, k]].abs();
        if val > max_val {
            max_val = val;
            max_idx = i;
        }
    }
    max_idx
}

fn swap_rows(m: &mut Matrix, a: usize, b: usize) {
    for j in 0..m.ncols() {
        m.swap([a, j], [b, j]);
    }
}
