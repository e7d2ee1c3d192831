//! plot — comparison charts and terminal rendering.
//!
//! Presentation layer for the pipeline: PNG line charts for the
//! original/filtered comparisons (plotters, bitmap backend) and a
//! Unicode sparkline plus numeric summary for the final terminal
//! report. Nothing here feeds back into the numeric pipeline.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

/// Eight-level block ramp used by the terminal sparkline.
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Draw a single signal as a PNG line chart.
pub fn signal_chart(path: &Path, caption: &str, signal: &[f64]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = value_envelope(&[signal]);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0..signal.len(), lo..hi)?;
    chart.configure_mesh().draw()?;

    chart.draw_series(LineSeries::new(
        signal.iter().enumerate().map(|(i, &v)| (i, v)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Draw an original/filtered overlay as a PNG line chart.
pub fn comparison_chart(
    path: &Path,
    caption: &str,
    original: &[f64],
    filtered: &[f64],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = value_envelope(&[original, filtered]);
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0..original.len(), lo..hi)?;
    chart.configure_mesh().draw()?;

    chart
        .draw_series(LineSeries::new(
            original.iter().enumerate().map(|(i, &v)| (i, v)),
            &BLUE.mix(0.6),
        ))?
        .label("original")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(
            filtered.iter().enumerate().map(|(i, &v)| (i, v)),
            &GREEN,
        ))?
        .label("filtered")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Render a signal as a fixed-width Unicode sparkline.
///
/// The signal is chunk-averaged down to at most `width` columns and each
/// column mapped onto an eight-level block ramp. A flat signal renders
/// as the lowest level.
pub fn sparkline(signal: &[f64], width: usize) -> String {
    if signal.is_empty() || width == 0 {
        return String::new();
    }

    let chunk = signal.len().div_ceil(width);
    let columns: Vec<f64> = signal
        .chunks(chunk)
        .map(|c| c.iter().sum::<f64>() / c.len() as f64)
        .collect();

    let lo = columns.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = columns.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    columns
        .iter()
        .map(|&v| {
            if span > 0.0 {
                let level = ((v - lo) / span * 7.0).round() as usize;
                SPARK_LEVELS[level.min(7)]
            } else {
                SPARK_LEVELS[0]
            }
        })
        .collect()
}

/// Pad the pointwise min/max of several signals for chart axes.
fn value_envelope(signals: &[&[f64]]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for signal in signals {
        for &v in *signal {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad, hi + pad)
}
