//! filters::family — tagged filter families and parameter coercion.
//!
//! Purpose
//! -------
//! Unify the three filter families under one capability contract so the
//! tuning stage can treat them uniformly: each family declares its
//! bounded hyperparameter space, coerces a raw optimizer vector into a
//! validated parameter record, and applies the resulting filter to a
//! signal. Dispatch happens once per optimization run, not per sample.
//!
//! Key behaviors
//! -------------
//! - [`FilterFamily`] is the family tag; [`FamilyParams`] is the
//!   family-specific parameter record produced by
//!   [`FilterFamily::params_from`].
//! - Coercion rules per family:
//!   - Kalman: Q and R used directly as real scalars.
//!   - Median: window rounded to the nearest integer, then forced odd
//!     via parity coercion (`| 1`).
//!   - Arima: p, d, q each truncated to integer.
//! - [`FamilyParams::apply`] constructs the concrete filter and runs it;
//!   the caller never touches the filter types directly during tuning.
//!
//! Conventions
//! -----------
//! - `params_from` expects a raw vector of exactly the family's
//!   dimension, which the search guarantees by construction; the
//!   coercions keep every in-bounds raw vector mappable to a valid
//!   record, so coercion itself cannot fail.

use crate::filters::arima::ArimaFilter;
use crate::filters::errors::FilterResult;
use crate::filters::kalman::KalmanFilter;
use crate::filters::median::MedianFilter;
use crate::optimization::evolution::SearchBounds;

/// FilterFamily — the three tuning strategies of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFamily {
    /// Constant-velocity recursive state estimator.
    Kalman,
    /// Sliding-window median primitive.
    Median,
    /// External autoregressive model adapter.
    Arima,
}

impl FilterFamily {
    /// Short human-readable family name for reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            FilterFamily::Kalman => "kalman",
            FilterFamily::Median => "median",
            FilterFamily::Arima => "arima",
        }
    }

    /// The family's declared hyperparameter search space.
    ///
    /// - Kalman: Q ∈ [1e-5, 1], R ∈ [1e-5, 1].
    /// - Median: window ∈ [3, 11].
    /// - Arima: p ∈ [1, 5], d ∈ [0, 2], q ∈ [0, 5].
    pub fn bounds(&self) -> SearchBounds {
        let pairs = match self {
            FilterFamily::Kalman => vec![(1e-5, 1.0), (1e-5, 1.0)],
            FilterFamily::Median => vec![(3.0, 11.0)],
            FilterFamily::Arima => vec![(1.0, 5.0), (0.0, 2.0), (0.0, 5.0)],
        };
        SearchBounds::new(pairs).expect("family bounds are valid by construction")
    }

    /// Coerce a raw in-bounds optimizer vector into a parameter record.
    ///
    /// # Arguments
    /// - `raw`: vector of length `self.bounds().dimension()`, within
    ///   bounds; both guaranteed when it comes from the search.
    pub fn params_from(&self, raw: &[f64]) -> FamilyParams {
        match self {
            FilterFamily::Kalman => FamilyParams::Kalman {
                process_noise: raw[0],
                measurement_noise: raw[1],
            },
            FilterFamily::Median => FamilyParams::Median {
                window: (raw[0].round() as usize) | 1,
            },
            FilterFamily::Arima => FamilyParams::Arima {
                ar: raw[0] as usize,
                diff: raw[1] as usize,
                ma: raw[2] as usize,
            },
        }
    }
}

impl std::fmt::Display for FilterFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// FamilyParams — validated per-family parameter record.
///
/// Produced by [`FilterFamily::params_from`]; applied to a signal via
/// [`FamilyParams::apply`]. Carrying the record (rather than the raw
/// optimizer vector) through the pipeline makes the definitive re-run
/// after tuning exactly reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FamilyParams {
    Kalman { process_noise: f64, measurement_noise: f64 },
    Median { window: usize },
    Arima { ar: usize, diff: usize, ma: usize },
}

impl FamilyParams {
    /// The family this record belongs to.
    pub fn family(&self) -> FilterFamily {
        match self {
            FamilyParams::Kalman { .. } => FilterFamily::Kalman,
            FamilyParams::Median { .. } => FilterFamily::Median,
            FamilyParams::Arima { .. } => FilterFamily::Arima,
        }
    }

    /// Construct the concrete filter and run it on a signal.
    ///
    /// # Errors
    /// - `FilterError::Input` for malformed signals.
    /// - `FilterError::InvalidWindow` cannot occur for coerced records
    ///   (parity is forced), only for hand-built ones.
    /// - `FilterError::ModelFit` when the ARIMA estimator fails.
    pub fn apply(&self, signal: &[f64]) -> FilterResult<Vec<f64>> {
        match *self {
            FamilyParams::Kalman { process_noise, measurement_noise } => {
                KalmanFilter::new(process_noise, measurement_noise).apply(signal)
            }
            FamilyParams::Median { window } => MedianFilter::new(window)?.apply(signal),
            FamilyParams::Arima { ar, diff, ma } => {
                ArimaFilter::new(ar, diff, ma).apply(signal)
            }
        }
    }
}

impl std::fmt::Display for FamilyParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FamilyParams::Kalman { process_noise, measurement_noise } => {
                write!(f, "kalman(Q = {process_noise:.6}, R = {measurement_noise:.6})")
            }
            FamilyParams::Median { window } => write!(f, "median(window = {window})"),
            FamilyParams::Arima { ar, diff, ma } => {
                write!(f, "arima(p = {ar}, d = {diff}, q = {ma})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_coercion_rounds_then_forces_odd() {
        let family = FilterFamily::Median;

        assert_eq!(family.params_from(&[4.4]), FamilyParams::Median { window: 5 });
        assert_eq!(family.params_from(&[4.6]), FamilyParams::Median { window: 5 });
        assert_eq!(family.params_from(&[7.0]), FamilyParams::Median { window: 7 });
        assert_eq!(family.params_from(&[10.8]), FamilyParams::Median { window: 11 });
    }

    #[test]
    fn arima_coercion_truncates_to_integer() {
        let params = FilterFamily::Arima.params_from(&[2.9, 1.7, 0.4]);
        assert_eq!(params, FamilyParams::Arima { ar: 2, diff: 1, ma: 0 });
    }

    #[test]
    fn kalman_coercion_passes_scalars_through() {
        let params = FilterFamily::Kalman.params_from(&[0.123, 0.456]);
        assert_eq!(
            params,
            FamilyParams::Kalman { process_noise: 0.123, measurement_noise: 0.456 }
        );
    }

    #[test]
    // Every in-bounds raw vector must coerce to a record that applies
    // cleanly; spot-check the median parity guarantee at the bound ends.
    fn coerced_median_windows_always_apply() {
        let signal: Vec<f64> = (0..40).map(|t| (t as f64 * 0.4).cos()).collect();
        for raw in [3.0, 3.9, 6.0, 8.5, 11.0] {
            let params = FilterFamily::Median.params_from(&[raw]);
            let out = params.apply(&signal).unwrap();
            assert_eq!(out.len(), signal.len());
        }
    }

    #[test]
    fn family_bounds_dimensions_match_params() {
        assert_eq!(FilterFamily::Kalman.bounds().dimension(), 2);
        assert_eq!(FilterFamily::Median.bounds().dimension(), 1);
        assert_eq!(FilterFamily::Arima.bounds().dimension(), 3);
    }

    #[test]
    fn display_formats_are_stable() {
        let params = FilterFamily::Arima.params_from(&[1.0, 0.0, 2.0]);
        assert_eq!(params.to_string(), "arima(p = 1, d = 0, q = 2)");
    }
}
