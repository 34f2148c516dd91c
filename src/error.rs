use core::fmt;

/// Result alias for `mvn`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by density evaluation and dataset statistics.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Matrix dimension mismatch (usize).
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A covariance matrix was not positive-definite, even after the single
    /// regularization retry.
    SingularCovariance {
        /// Index of the offending mixture component.
        component: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::SingularCovariance { component } => {
                write!(
                    f,
                    "covariance for component {component} is not positive-definite after regularization"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
