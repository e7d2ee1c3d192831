//! filters::kalman — constant-velocity recursive state estimation.
//!
//! Purpose
//! -------
//! Implement the hand-built recursive state estimator of the pipeline: a
//! one-dimensional, position-observed, linear-Gaussian Kalman filter
//! under a constant-velocity motion model. Given the process-noise
//! scalar Q and measurement-noise scalar R it produces the sequence of
//! updated position estimates, which is the "smoothed" signal.
//!
//! Key behaviors
//! -------------
//! - Track a two-component state (position, velocity) with transition
//!   matrix [[1, 1], [0, 1]] and measurement projection [1, 0].
//! - Scale Q into an isotropic 2×2 process covariance per step and treat
//!   R as the scalar observation variance.
//! - Initialize position to the first sample, velocity to 0, and the
//!   covariance to I₂ at the start of every run; nothing persists across
//!   runs.
//! - Clamp the scalar innovation covariance S from below with
//!   [`S_FLOOR`] so an exactly-zero R cannot divide by zero.
//!
//! Invariants & assumptions
//! ------------------------
//! - Processing is purely sequential and online-compatible: estimate t
//!   depends only on samples 0..=t, never on look-ahead.
//! - Output length equals input length, in the same time order.
//! - Q and R are finite and non-negative; the tuning stage searches them
//!   over [1e-5, 1], where the S clamp is unreachable.
//!
//! Conventions
//! -----------
//! - State and covariance use fixed-size `nalgebra` types (`Vector2`,
//!   `Matrix2`), keeping the per-step algebra allocation-free.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the passthrough limit (Q→0 drives smoothing, small
//!   R trusts measurements), variance reduction on an oscillating input,
//!   length preservation, and the R = 0 clamp path.

use nalgebra::{Matrix2, RowVector2, Vector2};

use crate::evaluation::validation::validate_signal;
use crate::filters::errors::FilterResult;

/// Lower clamp for the scalar innovation covariance S.
///
/// S = H·P'·Hᵗ + R is strictly positive whenever R > 0; with R exactly 0
/// and a fully collapsed predicted covariance the gain division would be
/// undefined, so S is floored here instead of raising an error.
pub const S_FLOOR: f64 = 1e-12;

/// KalmanFilter — constant-velocity position smoother.
///
/// Purpose
/// -------
/// Value object holding the two noise scalars of one filter
/// configuration. [`KalmanFilter::apply`] runs the full recursion over a
/// signal; the internal state lives only for the duration of that call.
///
/// Parameters
/// ----------
/// Constructed via [`KalmanFilter::new`]:
/// - `process_noise`: `f64`
///   Q, scaled into the isotropic 2×2 process covariance Q·I₂.
/// - `measurement_noise`: `f64`
///   R, the scalar observation variance.
///
/// Invariants
/// ----------
/// - The estimator state is reinitialized at the start of every
///   [`KalmanFilter::apply`] call and discarded at the end; no cross-run
///   persistence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanFilter {
    process_noise: f64,
    measurement_noise: f64,
}

impl KalmanFilter {
    /// Build a filter from the process-noise and measurement-noise scalars.
    pub fn new(process_noise: f64, measurement_noise: f64) -> Self {
        KalmanFilter { process_noise, measurement_noise }
    }

    /// Run the filter over a signal and return the position estimates.
    ///
    /// Parameters
    /// ----------
    /// - `signal`: `&[f64]`
    ///   Time-ordered observations; non-empty and finite.
    ///
    /// Returns
    /// -------
    /// `FilterResult<Vec<f64>>`
    ///   Updated position estimates, same length and order as the input.
    ///
    /// Errors
    /// ------
    /// - `FilterError::Input` when the signal is empty or contains a
    ///   non-finite sample.
    ///
    /// Notes
    /// -----
    /// - Per observation z: predict with A = [[1, 1], [0, 1]] and
    ///   P' = A·P·Aᵗ + Q·I₂; form S = H·P'·Hᵗ + R (floored by
    ///   [`S_FLOOR`]); gain K = P'·Hᵗ / S; update state with the
    ///   innovation z − H·x' and covariance with (I − K·H)·P'.
    pub fn apply(&self, signal: &[f64]) -> FilterResult<Vec<f64>> {
        validate_signal(signal)?;

        let transition = Matrix2::new(1.0, 1.0, 0.0, 1.0);
        let projection = RowVector2::new(1.0, 0.0);
        let process_cov = Matrix2::identity() * self.process_noise;

        let mut state = Vector2::new(signal[0], 0.0);
        let mut covariance = Matrix2::identity();

        let mut estimates = Vec::with_capacity(signal.len());
        for &z in signal {
            // Predict
            let state_pred = transition * state;
            let cov_pred = transition * covariance * transition.transpose() + process_cov;

            // Correct
            let s = (projection * cov_pred * projection.transpose())[(0, 0)]
                + self.measurement_noise;
            let s = s.max(S_FLOOR);
            let gain = cov_pred * projection.transpose() / s;
            let innovation = z - (projection * state_pred)[0];

            state = state_pred + gain * innovation;
            covariance = (Matrix2::identity() - gain * projection) * cov_pred;

            estimates.push(state[0]);
        }

        Ok(estimates)
    }
}
