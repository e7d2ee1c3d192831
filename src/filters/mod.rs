//! filters — filter families, auto-tuning, and hybrid fusion.
//!
//! Purpose
//! -------
//! House the filtering half of the pipeline: the three filter families
//! (recursive Kalman estimator, sliding-window median, external ARIMA
//! adapter) unified under one `apply(signal) -> signal` contract, the
//! per-family auto-tuning wrapper, and the hybrid combiner that fuses
//! the tuned outputs into one signal via an optimized convex blend.
//!
//! Key behaviors
//! -------------
//! - [`family::FilterFamily`] declares each family's bounded parameter
//!   space and coerces raw optimizer vectors into validated
//!   [`family::FamilyParams`] records; dispatch is once per run.
//! - [`tuned::AutoTunedFilter`] minimizes the composite score over a
//!   family's space and reports a deterministically re-computed output.
//! - [`hybrid::HybridCombiner`] searches simplex weights across several
//!   filtered signals and fuses them as a true convex combination.
//! - [`errors::FilterError`] unifies structural violations, search
//!   configuration failures, and external model-fit failures.
//!
//! Conventions
//! -----------
//! - Every filter output has the same length and time order as its
//!   input; no look-ahead, no cross-run state.
//! - Numeric degeneracies (innovation covariance, variance guards) are
//!   absorbed with epsilons; only structural violations surface.

pub mod arima;
pub mod errors;
pub mod family;
pub mod hybrid;
pub mod kalman;
pub mod median;
pub mod tuned;

pub use arima::ArimaFilter;
pub use errors::{FilterError, FilterResult};
pub use family::{FamilyParams, FilterFamily};
pub use hybrid::{BlendOutcome, HybridCombiner, WeightVector};
pub use kalman::KalmanFilter;
pub use median::MedianFilter;
pub use tuned::{AutoTunedFilter, TunedOutcome};
