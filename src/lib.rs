//! # mvn
//!
//! Full-covariance multivariate-normal log-density evaluation for Gaussian
//! mixture pipelines.
//!
//! The crate does one job well: given a data matrix and a set of
//! `(mean, covariance)` components, compute every per-sample, per-component
//! log-density through a Cholesky factorization — with a single
//! regularization retry when a component's covariance has gone degenerate.
//! Dataset loading, visualization, and the EM loop itself are the caller's
//! business.
//!
//! Enable the `parallel` feature to evaluate components across threads.

pub mod density;
/// Error types used across `mvn`.
pub mod error;
pub mod stats;


pub use density::DensityEvaluator;
pub use error::{Error, Result};
pub use stats::{empirical_covariance, gaussian_log_likelihood};
