//! Dense triangular primitives backing the density evaluator.
//!
//! Only what the evaluator needs: a lower-triangular Cholesky factorization
//! and a forward-substitution solve against the resulting factor.

use ndarray::{Array2, ArrayView2};

/// Lower-triangular Cholesky factorization of a symmetric matrix.
///
/// Returns `L` with `L·Lᵗ = m`, or `None` when the matrix is not positive
/// definite (a pivot comes out zero, negative, or non-finite). Only the lower
/// triangle of `m` is read; symmetry is assumed, not checked.
pub(crate) fn cholesky_lower(m: ArrayView2<'_, f64>) -> Option<Array2<f64>> {
    let d = m.nrows();
    let mut l = Array2::zeros((d, d));

    for i in 0..d {
        for j in 0..=i {
            let mut sum = m[[i, j]];
            for p in 0..j {
                sum -= l[[i, p]] * l[[j, p]];
            }

            if i == j {
                // A valid factor has strictly positive diagonal entries.
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[[i, j]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }

    Some(l)
}

/// Solve `L·z = b` by forward substitution, writing the solution into `z`.
///
/// `l` must be a lower-triangular factor produced by [`cholesky_lower`], so
/// its diagonal is strictly positive. O(D²) per right-hand side.
pub(crate) fn forward_substitute(l: &Array2<f64>, b: &[f64], z: &mut [f64]) {
    for j in 0..b.len() {
        let mut sum = b[j];
        for p in 0..j {
            sum -= l[[j, p]] * z[p];
        }
        z[j] = sum / l[[j, j]];
    }
}
