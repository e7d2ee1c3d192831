//! filters::errors — unified error handling for filter runs.
//!
//! Purpose
//! -------
//! Define `FilterError`, the central error type used by the filter
//! families, the auto-tuning wrapper, and the hybrid combiner. It groups
//! structural input violations (forwarded from the evaluation subtree),
//! search-space configuration failures, window-parity violations, and
//! model-fitting failures passed through from the external ARIMA
//! estimator. An alias `FilterResult<T>` standardizes the return type
//! across filter code.
//!
//! Conventions
//! -----------
//! - Numeric degeneracies (near-zero innovation covariance, vanishing
//!   variance) are absorbed by epsilon guards inside the filters and
//!   never appear here.
//! - External-library convergence diagnostics are logged, not raised;
//!   only a hard fitting failure on a definitive (non-candidate) run
//!   surfaces as `ModelFit`.

use crate::evaluation::errors::EvalError;
use crate::optimization::errors::SearchError;

pub type FilterResult<T> = Result<T, FilterError>;

/// Unified error type for filter construction and execution.
///
/// Designed to integrate with `anyhow::Error` via `From` so that the
/// external ARIMA estimator's failures propagate with `?`, and to wrap
/// the evaluation and search error surfaces of the inner subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    // ---- Structural input violations ----
    /// Forwarded from `evaluation::validation`.
    Input(EvalError),

    /// The hybrid combiner received an empty signal collection.
    NoSignals,

    // ---- Parameters ----
    /// The sliding-window median requires an odd window of at least 3.
    InvalidWindow { window: usize },

    /// Malformed search-space configuration.
    Search(SearchError),

    // ---- External model fitting ----
    /// The ARIMA estimator failed outright on a definitive run.
    ModelFit(String),
}

impl std::error::Error for FilterError {}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::Input(err) => write!(f, "Filter Error: {err}"),
            FilterError::NoSignals => {
                write!(f, "Filter Error: Need at least one signal to combine.")
            }
            FilterError::InvalidWindow { window } => {
                write!(
                    f,
                    "Filter Error: Median window must be odd and at least 3, got {window}."
                )
            }
            FilterError::Search(err) => write!(f, "Filter Error: {err}"),
            FilterError::ModelFit(msg) => write!(f, "Filter Error: ARIMA fit failed: {msg}"),
        }
    }
}

impl From<EvalError> for FilterError {
    fn from(err: EvalError) -> Self {
        FilterError::Input(err)
    }
}

impl From<SearchError> for FilterError {
    fn from(err: SearchError) -> Self {
        FilterError::Search(err)
    }
}

impl From<arima::ArimaError> for FilterError {
    fn from(err: arima::ArimaError) -> Self {
        FilterError::ModelFit(format!("{err:?}"))
    }
}

impl From<anyhow::Error> for FilterError {
    fn from(err: anyhow::Error) -> Self {
        FilterError::ModelFit(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_violation_wraps_eval_error_message() {
        let err = FilterError::from(EvalError::EmptySignal);
        assert!(err.to_string().contains("at least one sample"));
    }

    #[test]
    fn invalid_window_display_includes_payload() {
        let msg = FilterError::InvalidWindow { window: 4 }.to_string();
        assert!(msg.contains('4'), "Got: {msg}");
    }

    #[test]
    fn model_fit_preserves_inner_message() {
        let err = FilterError::from(anyhow::anyhow!("did not converge"));
        assert!(err.to_string().contains("did not converge"));
    }
}
