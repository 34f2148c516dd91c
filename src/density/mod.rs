//! Multivariate-normal log-density evaluation with full covariance matrices.
//!
//! This is the numeric core of a GMM pipeline: given N samples and K
//! `(mean, covariance)` components, produce the N×K matrix of per-sample,
//! per-component log-densities that the outer fitting loop turns into
//! responsibilities and likelihoods.
//!
//! # The Formula
//!
//! The log-density of sample x under component (μ, Σ) is:
//!
//! ```text
//! ln N(x | μ, Σ) = -½ (‖z‖² + D·ln(2π) + ln det Σ)    with L·z = x − μ
//! ```
//!
//! where L is the lower-triangular Cholesky factor of Σ (Σ = L·Lᵗ). Working
//! through the factor avoids both an explicit determinant and an explicit
//! inverse:
//!
//! - the determinant comes from the factor diagonal:
//!   `ln det Σ = 2 Σⱼ ln Lⱼⱼ`
//! - the quadratic form `(x−μ)ᵗ Σ⁻¹ (x−μ)` equals `‖z‖²`, one O(D²)
//!   forward substitution per sample
//!
//! # Degenerate Components
//!
//! During iterative fitting a component can collapse onto too few points,
//! leaving its covariance near-singular. When the factorization fails, the
//! evaluator retries once on `Σ + min_covar·I` (default `min_covar = 1e-7`).
//! If the retry also fails, the call errors out naming the component; a
//! degenerate component never leaks `-inf` or NaN into the output where it
//! would silently corrupt downstream likelihood sums.
//!
//! The retry is a fixed additive nudge, applied at most once. The outer
//! fitting loop's convergence behavior can depend on this exact policy, so it
//! is not scaled to the matrix or repeated with growing magnitude.
//!
//! # Usage
//!
//! ```rust
//! use mvn::DensityEvaluator;
//! use ndarray::array;
//!
//! let data = array![[1.0, 1.0], [2.0, 1.0]];
//! let means = array![[1.0, 1.0]];
//! let covariances = vec![array![[1.0, 0.0], [0.0, 1.0]]];
//!
//! let log_prob = DensityEvaluator::new()
//!     .evaluate(data.view(), means.view(), &covariances)
//!     .unwrap();
//!
//! // Sample at the mean of a unit Gaussian: -ln(2π)
//! assert!((log_prob[[0, 0]] + (2.0_f64 * std::f64::consts::PI).ln()).abs() < 1e-12);
//! // One unit off in one dimension costs exactly ½
//! assert!((log_prob[[1, 0]] - (log_prob[[0, 0]] - 0.5)).abs() < 1e-12);
//! ```

mod evaluator;
pub(crate) mod linalg;

pub use evaluator::DensityEvaluator;
