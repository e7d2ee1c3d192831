//! filters::hybrid — optimized convex blending of filtered signals.
//!
//! Purpose
//! -------
//! Fuse several already-filtered signals into one output via a weighted
//! sum whose weights are tuned by the bounded search. Absolute-value
//! plus renormalization keeps the weights on the probability simplex
//! without a constrained-optimization formulation, so the fused output
//! is a true convex combination with no gain or attenuation bias.
//!
//! Key behaviors
//! -------------
//! - Search m raw weights over [0, 1]ᵐ; the fitness takes each raw
//!   vector, absolute-values it, renormalizes to sum 1, blends, and
//!   scores the blend with the composite evaluator **against the first
//!   signal in the collection** — not the original raw signal. That
//!   reference choice is part of the contract and is preserved exactly.
//! - After the search, the best raw weights are again absolute-valued
//!   and renormalized, and the final output is recomputed once more
//!   deterministically with that normalized vector.
//! - An all-zero raw vector (a legitimate corner of the box) normalizes
//!   to uniform weights so the simplex invariant always holds.
//!
//! Invariants & assumptions
//! ------------------------
//! - All input signals are non-empty, finite, and of one common length;
//!   the collection order is significant and chosen by the caller.
//! - Every produced [`WeightVector`] has entries in [0, 1] summing to 1
//!   within 1e-9.

use ndarray::{aview1, Array1};

use crate::evaluation::composite::CompositeEvaluator;
use crate::evaluation::errors::EvalError;
use crate::evaluation::validation::validate_signal;
use crate::filters::errors::{FilterError, FilterResult};
use crate::optimization::evolution::{DifferentialEvolution, EvolutionOptions, SearchBounds};

/// Below this sum of absolute raw weights, normalization falls back to
/// the uniform vector.
const WEIGHT_SUM_FLOOR: f64 = 1e-12;

/// WeightVector — non-negative weights on the probability simplex.
///
/// Constructed only through [`WeightVector::normalized`], which maps any
/// raw real vector onto the simplex via absolute value and
/// renormalization. Entries are in [0, 1] and sum to 1 (±1e-9).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    weights: Vec<f64>,
}

impl WeightVector {
    /// Map a raw vector onto the simplex: |wᵢ| / Σ |wⱼ|.
    ///
    /// A (near-)zero-sum input yields the uniform vector; `raw` must be
    /// non-empty.
    pub fn normalized(raw: &[f64]) -> Self {
        debug_assert!(!raw.is_empty(), "weight vectors have at least one entry");
        let abs: Vec<f64> = raw.iter().map(|w| w.abs()).collect();
        let sum: f64 = abs.iter().sum();
        let weights = if sum > WEIGHT_SUM_FLOOR {
            abs.iter().map(|w| w / sum).collect()
        } else {
            vec![1.0 / raw.len() as f64; raw.len()]
        };
        WeightVector { weights }
    }

    /// The normalized weights, in collection order.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Number of signals this vector blends.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// BlendOutcome — definitive result of one fusion run.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendOutcome {
    /// Optimized simplex weights, in collection order.
    pub weights: WeightVector,
    /// The fused signal, recomputed deterministically with `weights`.
    pub output: Vec<f64>,
    /// Composite score of `output` against the first input signal.
    pub score: f64,
    /// Objective evaluations spent by the weight search.
    pub evaluations: usize,
}

/// HybridCombiner — weight search plus deterministic final blend.
#[derive(Debug, Clone, Default)]
pub struct HybridCombiner {
    evaluator: CompositeEvaluator,
    options: EvolutionOptions,
}

impl HybridCombiner {
    /// Combiner with default search options.
    pub fn new() -> Self {
        HybridCombiner::default()
    }

    /// Combiner with explicit search options (seed, budget, …).
    pub fn with_options(options: EvolutionOptions) -> Self {
        HybridCombiner { evaluator: CompositeEvaluator::new(), options }
    }

    /// Fuse an ordered collection of filtered signals.
    ///
    /// Parameters
    /// ----------
    /// - `signals`: `&[Vec<f64>]`
    ///   m ≥ 1 filtered signals of one common length n ≥ 1, in a
    ///   caller-chosen, significant order. The first signal is the
    ///   fidelity reference for scoring.
    ///
    /// Returns
    /// -------
    /// `FilterResult<BlendOutcome>` with simplex weights, the fused
    /// signal of length n, and its score.
    ///
    /// Errors
    /// ------
    /// - `FilterError::NoSignals` for an empty collection.
    /// - `FilterError::Input` when any signal is empty, non-finite, or
    ///   of mismatched length.
    pub fn run(&self, signals: &[Vec<f64>]) -> FilterResult<BlendOutcome> {
        let reference = signals.first().ok_or(FilterError::NoSignals)?;
        for signal in signals {
            validate_signal(signal)?;
            if signal.len() != reference.len() {
                return Err(EvalError::LengthMismatch {
                    expected: reference.len(),
                    got: signal.len(),
                }
                .into());
            }
        }

        let bounds = SearchBounds::new(vec![(0.0, 1.0); signals.len()])?;
        let search = DifferentialEvolution::with_options(bounds, self.options.clone());

        let evaluator = self.evaluator;
        let outcome = search.minimize(|raw| {
            let weights = WeightVector::normalized(raw);
            let blend = weighted_blend(signals, &weights);
            match evaluator.evaluate(reference, &blend) {
                Ok(score) => score,
                // Unreachable after the validation above; priced as
                // infinite rather than unwrapped on principle.
                Err(_) => f64::INFINITY,
            }
        });

        let weights = WeightVector::normalized(&outcome.best_params);
        let output = weighted_blend(signals, &weights);
        let score = self.evaluator.evaluate(reference, &output)?;
        log::info!(
            "hybrid blend weights {:?} (score = {score:.6}, {} evaluations)",
            weights.as_slice(),
            outcome.evaluations
        );

        Ok(BlendOutcome { weights, output, score, evaluations: outcome.evaluations })
    }
}

/// Weighted sum Σ wᵢ · signalᵢ over a validated collection.
fn weighted_blend(signals: &[Vec<f64>], weights: &WeightVector) -> Vec<f64> {
    let n = signals[0].len();
    let mut acc = Array1::<f64>::zeros(n);
    for (w, signal) in weights.as_slice().iter().zip(signals) {
        acc.scaled_add(*w, &aview1(signal));
    }
    acc.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Simplex invariants of WeightVector under extreme raw inputs.
    // - Structural validation of the signal collection.
    // - Convexity of the fused output (stays within the input envelope).
    // - Seeded reproducibility of a fusion run.
    // -------------------------------------------------------------------------

    fn simplex_ok(weights: &WeightVector) -> bool {
        let sum: f64 = weights.as_slice().iter().sum();
        (sum - 1.0).abs() <= 1e-9
            && weights.as_slice().iter().all(|&w| (0.0..=1.0).contains(&w))
    }

    #[test]
    fn normalization_maps_arbitrary_raw_vectors_onto_simplex() {
        for raw in [
            vec![0.2, 0.3, 0.5],
            vec![-1.0, 2.0, -3.0],
            vec![1e-8, 1e-8, 1e-8],
            vec![0.0, 0.7],
            vec![5.0],
        ] {
            let weights = WeightVector::normalized(&raw);
            assert!(simplex_ok(&weights), "raw {raw:?} broke the simplex invariant");
        }
    }

    #[test]
    fn all_zero_raw_weights_fall_back_to_uniform() {
        let weights = WeightVector::normalized(&[0.0, 0.0, 0.0, 0.0]);
        for &w in weights.as_slice() {
            assert!((w - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_collection_is_rejected() {
        let combiner = HybridCombiner::new();
        assert!(matches!(combiner.run(&[]), Err(FilterError::NoSignals)));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let combiner = HybridCombiner::new();
        let got = combiner.run(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0]]);
        assert!(matches!(got, Err(FilterError::Input(EvalError::LengthMismatch { .. }))));
    }

    #[test]
    // Purpose
    // -------
    // A convex combination can never leave the pointwise envelope of
    // its inputs; check the fused output against min/max per index.
    fn fused_output_stays_within_input_envelope() {
        // Arrange
        let a: Vec<f64> = (0..60).map(|t| (t as f64 * 0.2).sin()).collect();
        let b: Vec<f64> = (0..60).map(|t| (t as f64 * 0.2).sin() * 0.5 + 0.1).collect();
        let c: Vec<f64> = (0..60).map(|t| (t as f64 * 0.25).cos() * 0.8).collect();
        let combiner = HybridCombiner::with_options(EvolutionOptions::seeded(17));

        // Act
        let outcome = combiner.run(&[a.clone(), b.clone(), c.clone()]).unwrap();

        // Assert
        assert!(simplex_ok(&outcome.weights));
        for i in 0..a.len() {
            let lo = a[i].min(b[i]).min(c[i]) - 1e-9;
            let hi = a[i].max(b[i]).max(c[i]) + 1e-9;
            assert!(
                (lo..=hi).contains(&outcome.output[i]),
                "fused sample {i} left the convex envelope"
            );
        }
    }

    #[test]
    fn seeded_fusion_runs_are_reproducible() {
        let a: Vec<f64> = (0..40).map(|t| (t as f64 * 0.3).sin()).collect();
        let b: Vec<f64> = (0..40).map(|t| (t as f64 * 0.3).sin() * 0.9).collect();
        let options = EvolutionOptions { max_generations: 10, seed: Some(33), ..Default::default() };

        let first = HybridCombiner::with_options(options.clone()).run(&[a.clone(), b.clone()]);
        let second = HybridCombiner::with_options(options).run(&[a, b]);

        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn single_signal_blend_is_identity() {
        let a: Vec<f64> = (0..30).map(|t| t as f64 * 0.1).collect();
        let combiner = HybridCombiner::with_options(EvolutionOptions::seeded(5));

        let outcome = combiner.run(&[a.clone()]).unwrap();

        assert_eq!(outcome.weights.as_slice(), &[1.0]);
        for (x, y) in outcome.output.iter().zip(&a) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
    }
}
