//! evaluation::errors — error surface for signal-quality scoring.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the composite
//! evaluator and its input validation helpers. Structural input
//! violations (empty signals, mismatched lengths, non-finite samples)
//! are the only failures this subtree reports; numeric edge cases such
//! as near-zero variance or vanishing spectra are absorbed by epsilon
//! guards inside the evaluator and never surface here.
//!
//! Key behaviors
//! -------------
//! - Define [`EvalResult`] and [`EvalError`] as the canonical result and
//!   error types for quality scoring and signal validation.
//! - Attach human-readable `Display` messages phrased in terms of domain
//!   constraints ("signals must have equal length") rather than
//!   implementation details.
//!
//! Conventions
//! -----------
//! - Filter-level and pipeline-level error types wrap [`EvalError`] via
//!   `From` conversions; this module stays leaf-level and depends on
//!   nothing else in the crate.
//! - Variants carry just enough payload (offending value, expected vs
//!   observed length) for meaningful diagnostics without holding large
//!   buffers.

pub type EvalResult<T> = Result<T, EvalError>;

/// EvalError — structural input violations for quality scoring.
///
/// Variants
/// --------
/// - `EmptySignal`
///   A signal with zero samples was passed where at least one sample is
///   required.
/// - `NonFiniteSample(value: f64)`
///   A sample is NaN or ±∞ and cannot participate in spectral or
///   statistical computations.
/// - `LengthMismatch { expected, got }`
///   The original and candidate signals passed to the evaluator differ
///   in length.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    EmptySignal,
    NonFiniteSample(f64),
    LengthMismatch { expected: usize, got: usize },
}

impl std::error::Error for EvalError {}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::EmptySignal => {
                write!(f, "Signal must contain at least one sample.")
            }
            EvalError::NonFiniteSample(value) => {
                write!(f, "Invalid sample value: {value}. Must be a finite number.")
            }
            EvalError::LengthMismatch { expected, got } => {
                write!(
                    f,
                    "Signals must have equal length: expected {expected}, got {got}."
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for EvalError variants.
    // - Embedding of payload values into error messages.
    // -------------------------------------------------------------------------

    #[test]
    fn empty_signal_has_nonempty_display_message() {
        let msg = EvalError::EmptySignal.to_string();
        assert!(!msg.trim().is_empty());
    }

    #[test]
    fn non_finite_sample_includes_payload_in_display() {
        let msg = EvalError::NonFiniteSample(f64::NAN).to_string();
        assert!(
            msg.contains("NaN"),
            "Display message should include the offending value.\nGot: {msg}"
        );
    }

    #[test]
    fn length_mismatch_includes_both_lengths_in_display() {
        let msg = EvalError::LengthMismatch { expected: 10, got: 7 }.to_string();
        assert!(msg.contains("10") && msg.contains('7'), "Got: {msg}");
    }
}
