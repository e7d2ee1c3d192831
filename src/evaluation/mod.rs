//! evaluation — composite signal-quality scoring and input guards.
//!
//! Purpose
//! -------
//! Provide the single fitness function that drives every automatic
//! parameter search in this crate, together with the structural input
//! validation shared by scoring and filtering entry points.
//!
//! Key behaviors
//! -------------
//! - Expose the composite evaluator via [`CompositeEvaluator`] and its
//!   per-term [`ScoreBreakdown`].
//! - Centralize signal and pair preconditions in
//!   [`validation::validate_signal`] and [`validation::validate_pair`].
//! - Report structural violations through [`EvalError`] / [`EvalResult`];
//!   numeric edge cases are absorbed by epsilon guards and never raised.
//!
//! Conventions
//! -----------
//! - Scores are scalar, non-negative, and lower-is-better; they rank
//!   candidates within one search and are never compared across inputs.
//! - This subtree performs no I/O and no logging.

pub mod composite;
pub mod errors;
pub mod validation;

pub use composite::{CompositeEvaluator, ScoreBreakdown};
pub use errors::{EvalError, EvalResult};
