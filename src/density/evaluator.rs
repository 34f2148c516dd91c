//! Full-covariance log-density evaluation.

use super::linalg;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Log-density evaluator for full-covariance Gaussian components.
///
/// Computes, for every sample and every `(mean, covariance)` pair, the
/// log-density of the sample under that component. The covariance is
/// factorized per component; a factorization failure triggers one retry with
/// `min_covar` added to the diagonal before the call errors out.
#[derive(Debug, Clone)]
pub struct DensityEvaluator {
    /// Diagonal regularization applied when a covariance fails to factorize.
    min_covar: f64,
}

impl DensityEvaluator {
    /// Create an evaluator with the default regularization (`1e-7`).
    pub fn new() -> Self {
        Self { min_covar: 1e-7 }
    }

    /// Set the diagonal regularization used on factorization failure.
    pub fn with_min_covar(mut self, min_covar: f64) -> Self {
        self.min_covar = min_covar;
        self
    }

    /// Evaluate log-densities for every sample under every component.
    ///
    /// `data` is N×D (one sample per row), `means` is K×D (one component per
    /// row), and `covariances` holds K symmetric D×D matrices in the same
    /// order as `means`. Returns an N×K matrix where entry `[i, c]` is the
    /// log-density of sample `i` under component `c`; column order follows
    /// component order.
    ///
    /// All validation happens before any factorization: a bad shape or
    /// parameter never produces partial output. A component whose covariance
    /// cannot be factorized even after regularization aborts the whole call
    /// with [`Error::SingularCovariance`]; degenerate components are never
    /// smuggled through as `-inf` or NaN columns.
    pub fn evaluate(
        &self,
        data: ArrayView2<'_, f64>,
        means: ArrayView2<'_, f64>,
        covariances: &[Array2<f64>],
    ) -> Result<Array2<f64>> {
        if !self.min_covar.is_finite() || self.min_covar <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "min_covar",
                message: "must be > 0 and finite",
            });
        }

        let n = data.nrows();
        let d = data.ncols();
        let k = means.nrows();

        if n == 0 {
            return Err(Error::InvalidParameter {
                name: "data",
                message: "needs at least one sample",
            });
        }
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "data",
                message: "needs at least one dimension",
            });
        }
        if k == 0 {
            return Err(Error::InvalidParameter {
                name: "means",
                message: "needs at least one component",
            });
        }
        if means.ncols() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: means.ncols(),
            });
        }
        if covariances.len() != k {
            return Err(Error::DimensionMismatch {
                expected: k,
                found: covariances.len(),
            });
        }
        for cov in covariances {
            if cov.nrows() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: cov.nrows(),
                });
            }
            if cov.ncols() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: cov.ncols(),
                });
            }
        }

        // Components are independent - evaluate one column per component,
        // in parallel when the feature is enabled.
        #[cfg(feature = "parallel")]
        let columns = (0..k)
            .into_par_iter()
            .map(|c| self.component_column(data, means.row(c), &covariances[c], c))
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let columns = (0..k)
            .map(|c| self.component_column(data, means.row(c), &covariances[c], c))
            .collect::<Result<Vec<_>>>()?;

        let mut log_prob = Array2::zeros((n, k));
        for (c, column) in columns.iter().enumerate() {
            log_prob.column_mut(c).assign(column);
        }

        Ok(log_prob)
    }

    /// Log-densities of every sample under a single component.
    fn component_column(
        &self,
        data: ArrayView2<'_, f64>,
        mean: ArrayView1<'_, f64>,
        covariance: &Array2<f64>,
        component: usize,
    ) -> Result<Array1<f64>> {
        let n = data.nrows();
        let d = data.ncols();

        let chol = match linalg::cholesky_lower(covariance.view()) {
            Some(l) => l,
            None => {
                // The component has most likely collapsed onto too few
                // observations; nudge the diagonal and retry once.
                log::debug!(
                    "covariance for component {component} failed to factorize; \
                     retrying with {:e} added to the diagonal",
                    self.min_covar
                );
                let mut nudged = covariance.clone();
                for j in 0..d {
                    nudged[[j, j]] += self.min_covar;
                }
                match linalg::cholesky_lower(nudged.view()) {
                    Some(l) => l,
                    None => {
                        log::warn!(
                            "covariance for component {component} is singular even after \
                             regularization"
                        );
                        return Err(Error::SingularCovariance { component });
                    }
                }
            }
        };

        // det(Σ) from the factor diagonal: Σ = L·Lᵗ, so log det = 2·Σ ln Lⱼⱼ.
        let cv_log_det = 2.0 * chol.diag().iter().map(|v| v.ln()).sum::<f64>();
        let norm = d as f64 * (2.0 * std::f64::consts::PI).ln() + cv_log_det;

        let mut column = Array1::zeros(n);
        let mut residual = vec![0.0; d];
        let mut whitened = vec![0.0; d];

        for i in 0..n {
            let x = data.row(i);
            for j in 0..d {
                residual[j] = x[j] - mean[j];
            }

            // ‖z‖² with L·z = x − μ equals the Mahalanobis form (x−μ)ᵗΣ⁻¹(x−μ).
            linalg::forward_substitute(&chol, &residual, &mut whitened);
            let mahalanobis: f64 = whitened.iter().map(|z| z * z).sum();

            column[i] = -0.5 * (mahalanobis + norm);
        }

        Ok(column)
    }
}

impl Default for DensityEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
