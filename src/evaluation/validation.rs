//! evaluation::validation — shared input guards for signal routines.
//!
//! Purpose
//! -------
//! Centralize the structural preconditions that every scoring and
//! filtering entry point in this crate relies on: signals must be
//! non-empty and contain only finite samples, and signal pairs passed to
//! the evaluator must have equal length. Keeping these checks in one
//! place avoids duplicating them across the evaluator, the filter
//! families, and the hybrid combiner.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and
//!   allocates nothing beyond error construction.
//! - A successful return (`Ok(())`) guarantees the basic shape and
//!   finiteness constraints; callers remain responsible for any further
//!   domain-specific checks (window sizes, model orders, etc.).

use crate::evaluation::errors::{EvalError, EvalResult};

/// Validate that a signal is non-empty and contains only finite samples.
///
/// Parameters
/// ----------
/// - `signal`: `&[f64]`
///   Ordered sequence of real samples.
///
/// Errors
/// ------
/// - `EvalError::EmptySignal` when `signal.len() == 0`.
/// - `EvalError::NonFiniteSample(value)` for the first NaN or ±∞ entry.
pub fn validate_signal(signal: &[f64]) -> EvalResult<()> {
    if signal.is_empty() {
        return Err(EvalError::EmptySignal);
    }
    if let Some(&bad) = signal.iter().find(|v| !v.is_finite()) {
        return Err(EvalError::NonFiniteSample(bad));
    }
    Ok(())
}

/// Validate an (original, candidate) pair for quality scoring.
///
/// Both signals must individually satisfy [`validate_signal`] and must
/// have equal length; unequal lengths are a precondition violation, not
/// a recoverable condition.
///
/// Errors
/// ------
/// - Any error from [`validate_signal`] on either input.
/// - `EvalError::LengthMismatch` when the lengths differ.
pub fn validate_pair(original: &[f64], candidate: &[f64]) -> EvalResult<()> {
    validate_signal(original)?;
    validate_signal(candidate)?;
    if original.len() != candidate.len() {
        return Err(EvalError::LengthMismatch {
            expected: original.len(),
            got: candidate.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_signal_accepts_finite_nonempty_input() {
        assert!(validate_signal(&[1.0, -2.5, 0.0]).is_ok());
    }

    #[test]
    fn validate_signal_rejects_empty_input() {
        assert_eq!(validate_signal(&[]), Err(EvalError::EmptySignal));
    }

    #[test]
    fn validate_signal_rejects_nan() {
        let got = validate_signal(&[1.0, f64::NAN, 3.0]);
        assert!(matches!(got, Err(EvalError::NonFiniteSample(_))));
    }

    #[test]
    fn validate_signal_rejects_infinity() {
        let got = validate_signal(&[1.0, f64::INFINITY]);
        assert!(matches!(got, Err(EvalError::NonFiniteSample(_))));
    }

    #[test]
    fn validate_pair_rejects_mismatched_lengths() {
        let got = validate_pair(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
        assert_eq!(got, Err(EvalError::LengthMismatch { expected: 3, got: 2 }));
    }

    #[test]
    fn validate_pair_accepts_equal_length_signals() {
        assert!(validate_pair(&[1.0, 2.0], &[3.0, 4.0]).is_ok());
    }
}
