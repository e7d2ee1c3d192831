//! optimization — bounded black-box search and its error surface.
//!
//! Purpose
//! -------
//! Provide the generic parameter-search layer used by the tuning stages:
//! a validated box-constrained search space, a differential-evolution
//! minimizer with a fixed generation budget, and a small error surface
//! for malformed configurations. Callers supply a black-box objective
//! and obtain a best-found parameter vector plus search diagnostics
//! without touching solver internals.
//!
//! Key behaviors
//! -------------
//! - Expose bounded stochastic global search via
//!   [`DifferentialEvolution`] configured by [`EvolutionOptions`].
//! - Validate search spaces once, at [`SearchBounds`] construction, so
//!   the hot loop never re-checks shape or finiteness.
//! - Report configuration problems through [`SearchError`] /
//!   [`SearchResult`]; budget exhaustion without improvement is by
//!   contract *not* an error.
//!
//! Conventions
//! -----------
//! - Objectives are minimized; lower scores are strictly better.
//! - Reproducibility is opt-in via an explicit RNG seed in
//!   [`EvolutionOptions`]; unseeded searches are best-effort.
//! - This subtree avoids I/O and logging; higher layers report progress.

pub mod errors;
pub mod evolution;

pub use errors::{SearchError, SearchResult};
pub use evolution::{
    DifferentialEvolution, EvolutionOptions, SearchBounds, SearchOutcome, DEFAULT_GENERATIONS,
};
