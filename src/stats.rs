//! Dataset statistics built on the density evaluator.
//!
//! Companions to the evaluator for callers that want quick Gaussian
//! summaries of a raw dataset: the empirical covariance of the rows, and the
//! log-likelihood of the rows under a single Gaussian fit to them.

use crate::density::DensityEvaluator;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, Axis};

/// Empirical covariance of the rows of an N×D data matrix.
///
/// Uses the unbiased estimator (N − 1 denominator), so at least two samples
/// are required. The result is symmetric by construction.
pub fn empirical_covariance(data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    let n = data.nrows();
    let d = data.ncols();

    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if n < 2 {
        return Err(Error::InvalidParameter {
            name: "data",
            message: "needs at least two samples",
        });
    }
    if d == 0 {
        return Err(Error::InvalidParameter {
            name: "data",
            message: "needs at least one dimension",
        });
    }

    let mean = data.mean_axis(Axis(0)).ok_or(Error::EmptyInput)?;

    // Accumulate the upper triangle, then mirror.
    let mut covariance = Array2::zeros((d, d));
    for i in 0..n {
        let row = data.row(i);
        for a in 0..d {
            let err_a = row[a] - mean[a];
            for b in a..d {
                covariance[[a, b]] += err_a * (row[b] - mean[b]);
            }
        }
    }

    let denom = (n - 1) as f64;
    for a in 0..d {
        for b in a..d {
            covariance[[a, b]] /= denom;
            covariance[[b, a]] = covariance[[a, b]];
        }
    }

    Ok(covariance)
}

/// Total log-likelihood of the rows of `data` under a single Gaussian fit to
/// the data itself (column means + [`empirical_covariance`]).
///
/// The likelihood is evaluated through [`DensityEvaluator`], so a
/// near-singular sample covariance follows the evaluator's
/// regularize-or-error contract instead of producing `ln(0)`.
pub fn gaussian_log_likelihood(data: ArrayView2<'_, f64>) -> Result<f64> {
    let covariance = empirical_covariance(data)?;
    let mean = data.mean_axis(Axis(0)).ok_or(Error::EmptyInput)?;
    let means = mean.insert_axis(Axis(0));

    let log_prob = DensityEvaluator::new().evaluate(
        data,
        means.view(),
        std::slice::from_ref(&covariance),
    )?;

    Ok(log_prob.column(0).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_covariance_identity_like_data() {
        // Four points on the axes: variance 2/3 per axis, no cross term.
        let data = array![[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0], [0.0, -1.0]];
        let cov = empirical_covariance(data.view()).unwrap();

        assert!((cov[[0, 0]] - 2.0 / 3.0).abs() < 1e-12);
        assert!((cov[[1, 1]] - 2.0 / 3.0).abs() < 1e-12);
        assert!(cov[[0, 1]].abs() < 1e-12);
        assert!(cov[[1, 0]].abs() < 1e-12);
    }

    #[test]
    fn test_covariance_hand_computed() {
        // Two points: mean (1.5, 2.5), each deviation (±0.5, ±0.5).
        let data = array![[1.0, 2.0], [2.0, 3.0]];
        let cov = empirical_covariance(data.view()).unwrap();

        for &(a, b) in &[(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert!((cov[[a, b]] - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_covariance_is_symmetric() {
        let data = array![[0.1, 2.0, -1.0], [1.3, 0.4, 0.2], [-0.7, 1.1, 3.0]];
        let cov = empirical_covariance(data.view()).unwrap();
        for a in 0..3 {
            for b in 0..3 {
                assert_eq!(cov[[a, b]], cov[[b, a]]);
            }
        }
    }

    #[test]
    fn test_covariance_empty_input() {
        let data = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            empirical_covariance(data.view()).unwrap_err(),
            Error::EmptyInput
        );
    }

    #[test]
    fn test_covariance_single_sample_rejected() {
        let data = array![[1.0, 2.0]];
        assert!(matches!(
            empirical_covariance(data.view()).unwrap_err(),
            Error::InvalidParameter { name: "data", .. }
        ));
    }

    #[test]
    fn test_log_likelihood_matches_column_sum() {
        let data = array![[0.0, 0.0], [1.0, 0.5], [0.5, 1.0], [1.5, 1.5]];

        let cov = empirical_covariance(data.view()).unwrap();
        let mean = data.mean_axis(Axis(0)).unwrap().insert_axis(Axis(0));
        let log_prob = DensityEvaluator::new()
            .evaluate(data.view(), mean.view(), std::slice::from_ref(&cov))
            .unwrap();

        let ll = gaussian_log_likelihood(data.view()).unwrap();
        assert!((ll - log_prob.column(0).sum()).abs() < 1e-12);
    }

    #[test]
    fn test_log_likelihood_tighter_data_scores_higher() {
        let tight = array![[0.0, 0.0], [0.1, 0.0], [0.0, 0.1], [0.1, 0.1]];
        let loose = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

        let ll_tight = gaussian_log_likelihood(tight.view()).unwrap();
        let ll_loose = gaussian_log_likelihood(loose.view()).unwrap();
        assert!(ll_tight > ll_loose);
    }
}
