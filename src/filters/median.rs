//! filters::median — sliding-window median primitive.
//!
//! Purpose
//! -------
//! Provide the spike-rejection filter family: a sliding-window median
//! with an odd window length and zero-padded edge handling. A median
//! replaces isolated large-magnitude outliers with a locally observed
//! level without the lag a moving average would introduce.
//!
//! Conventions
//! -----------
//! - The window must be odd and at least 3; window coercion from raw
//!   optimizer parameters happens in `filters::family`, this module only
//!   validates.
//! - Samples outside the signal are treated as 0.0, matching the usual
//!   zero-padding convention of sliding-window medians; near the edges
//!   of signals far from zero this biases toward zero, which the tuning
//!   stage prices in via the composite score.

use crate::evaluation::validation::validate_signal;
use crate::filters::errors::{FilterError, FilterResult};

/// MedianFilter — odd-window sliding median.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianFilter {
    window: usize,
}

impl MedianFilter {
    /// Build a median filter with the given odd window length.
    ///
    /// # Errors
    /// - `FilterError::InvalidWindow` when `window` is even or below 3.
    pub fn new(window: usize) -> FilterResult<Self> {
        if window < 3 || window % 2 == 0 {
            return Err(FilterError::InvalidWindow { window });
        }
        Ok(MedianFilter { window })
    }

    /// The window length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Apply the sliding median to a signal.
    ///
    /// # Arguments
    /// - `signal`: time-ordered samples; non-empty and finite.
    ///
    /// # Returns
    /// Same-length sequence where sample i is the median of the
    /// zero-padded window centered on i.
    ///
    /// # Errors
    /// - `FilterError::Input` for an empty or non-finite signal.
    pub fn apply(&self, signal: &[f64]) -> FilterResult<Vec<f64>> {
        validate_signal(signal)?;

        let half = self.window / 2;
        let n = signal.len() as isize;
        let mut window_buf = Vec::with_capacity(self.window);
        let mut out = Vec::with_capacity(signal.len());

        for center in 0..signal.len() as isize {
            window_buf.clear();
            for offset in -(half as isize)..=(half as isize) {
                let idx = center + offset;
                if idx >= 0 && idx < n {
                    window_buf.push(signal[idx as usize]);
                } else {
                    window_buf.push(0.0);
                }
            }
            window_buf.sort_by(|a, b| a.partial_cmp(b).expect("validated finite samples"));
            out.push(window_buf[half]);
        }

        Ok(out)
    }
}
