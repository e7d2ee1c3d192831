//! hybrid_denoise — optimization-driven denoising of scalar time series.
//!
//! Purpose
//! -------
//! Denoise a single scalar time series (e.g., a geophysical magnetometry
//! record) by running three independent filtering strategies, auto-tuning
//! each strategy's hyperparameters against one composite signal-quality
//! score, and fusing the tuned outputs into one signal via an optimized
//! convex blend.
//!
//! Key behaviors
//! -------------
//! - `filters::kalman` implements the hand-built recursive state
//!   estimator (constant-velocity model); `filters::median` and
//!   `filters::arima` wrap the sliding-median primitive and the external
//!   autoregressive estimator behind the same `apply` contract.
//! - `optimization` provides the bounded differential-evolution search
//!   every tuning stage delegates to, with an explicit seed for
//!   reproducible runs.
//! - `evaluation` implements the composite fitness (spectral fidelity,
//!   smoothness, entropy, flatness) used identically by every search.
//! - `filters::tuned` and `filters::hybrid` orchestrate per-family
//!   tuning and the final convex fusion.
//! - `io` and `plot` handle the CSV boundary and presentation; the
//!   `denoise` binary wires the whole pipeline together.
//!
//! Invariants & assumptions
//! ------------------------
//! - Whole-array batch processing only: no streaming, no cancellation,
//!   and no estimator state surviving across invocations.
//! - Every filter output has the same length and time order as its
//!   input; fused outputs are true convex combinations of their inputs.
//! - Searches are best-effort under a fixed generation budget; they
//!   never fail for lack of convergence, only for structural misuse.
//!
//! Conventions
//! -----------
//! - Scores are scalar and lower-is-better; they rank candidates within
//!   one search and are never interpreted as probabilities.
//! - Numeric edge cases are absorbed by epsilon guards close to where
//!   they arise; only structural input violations (empty signals,
//!   non-finite samples, shape mismatches) propagate as errors.
//! - Logging goes through the `log` facade; binaries choose the backend.
//!
//! Downstream usage
//! ----------------
//! - Library callers typically run three
//!   [`AutoTunedFilter`](filters::AutoTunedFilter) instances (one per
//!   [`FilterFamily`](filters::FilterFamily)) on a raw signal and hand
//!   the outputs, in a fixed order, to a
//!   [`HybridCombiner`](filters::HybridCombiner).
//! - The `denoise` binary adds CSV ingestion, PNG comparison charts, a
//!   terminal sparkline report, and persistence of the fused signal.

pub mod evaluation;
pub mod filters;
pub mod io;
pub mod optimization;
pub mod plot;

pub use evaluation::{CompositeEvaluator, EvalError, EvalResult, ScoreBreakdown};
pub use filters::{
    AutoTunedFilter, BlendOutcome, FamilyParams, FilterError, FilterFamily, FilterResult,
    HybridCombiner, TunedOutcome, WeightVector,
};
pub use optimization::{
    DifferentialEvolution, EvolutionOptions, SearchBounds, SearchError, SearchOutcome,
};
