//! SVG rendering of per-kernel charts.
//!
//! One chart per kernel: either the speedup/normalized-energy scatter with
//! the Pareto front drawn as a staircase, or a derived metric against core
//! frequency. Both mark the baseline configuration with a black cross.

use errors::*;
use pareto;
use plotters::prelude::*;
use speedup::ConfigPoint;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (640, 480);

/// Core frequency mapped onto a hue ramp: low frequencies are blue, high
/// frequencies yellow. A degenerate (single-frequency) range sits in the
/// middle of the ramp.
fn freq_color(freq: f64, min: f64, max: f64) -> HSLColor {
    let t = if max > min { (freq - min) / (max - min) } else { 0.5 };
    HSLColor(0.7 - 0.55 * t, 0.9, 0.45)
}

fn render_err<E: ::std::fmt::Display>(path: &Path, e: E) -> Error {
    Error::from(format!("failed to render {}: {}", path.display(), e))
}

/// The axis range covering `values`, padded so that no sample sits on the
/// chart border.
fn span<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let mut min = ::std::f64::INFINITY;
    let mut max = ::std::f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }

    if min > max {
        (0.0, 1.0)
    } else if min == max {
        (min - 0.5, max + 0.5)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

/// Draws one kernel's configurations in the (speedup, normalized energy)
/// plane and overlays the Pareto front as a red staircase.
///
/// Points are colored by core frequency; the baseline configuration sits at
/// (1, 1) by construction and is marked with a black cross.
pub fn pareto_chart(kernel: &str, points: &[ConfigPoint], out: &Path) -> Result<()> {
    let root = SVGBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_err(out, e))?;

    let (x_min, x_max) = span(points.iter().map(|p| p.point.speedup).chain(Some(1.0)));
    let (y_min, y_max) = span(points.iter().map(|p| p.point.energy).chain(Some(1.0)));

    // color ramp over the measured frequency range, not the padded axis span
    let core_min = points.iter().map(|p| p.core_freq).fold(::std::f64::INFINITY, f64::min);
    let core_max = points
        .iter()
        .map(|p| p.core_freq)
        .fold(::std::f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(kernel, ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| render_err(out, e))?;

    chart
        .configure_mesh()
        .x_desc("Speedup")
        .y_desc("Normalized Energy")
        .draw()
        .map_err(|e| render_err(out, e))?;

    chart
        .draw_series(points.iter().map(|p| {
            let color = freq_color(p.core_freq, core_min, core_max);
            Circle::new((p.point.speedup, p.point.energy), 3, color.filled())
        }))
        .map_err(|e| render_err(out, e))?;

    let objectives = points.iter().map(|p| p.point).collect::<Vec<_>>();
    let members = pareto::pareto_front(&objectives)
        .into_iter()
        .map(|i| objectives[i])
        .collect::<Vec<_>>();
    for (from, to) in pareto::staircase(&members) {
        chart
            .draw_series(LineSeries::new(vec![from, to], &RED))
            .map_err(|e| render_err(out, e))?;
    }

    chart
        .draw_series(::std::iter::once(Cross::new((1.0, 1.0), 5, BLACK.stroke_width(2))))
        .map_err(|e| render_err(out, e))?
        .label("default configuration")
        .legend(|(x, y)| Cross::new((x, y), 5, BLACK.stroke_width(2)));
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| render_err(out, e))?;

    root.present().map_err(|e| render_err(out, e))?;
    Ok(())
}

/// Draws a derived metric (EDP, ED2P) against core frequency for one kernel.
/// `samples` are (core frequency, metric) pairs; `baseline` is the metric of
/// the baseline configuration, marked with a black cross.
pub fn metric_chart(
    kernel: &str,
    y_desc: &str,
    samples: &[(f64, f64)],
    baseline: (f64, f64),
    out: &Path,
) -> Result<()> {
    let root = SVGBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_err(out, e))?;

    let (x_min, x_max) = span(samples.iter().map(|s| s.0).chain(Some(baseline.0)));
    let (y_min, y_max) = span(samples.iter().map(|s| s.1).chain(Some(baseline.1)));

    let mut chart = ChartBuilder::on(&root)
        .caption(kernel, ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| render_err(out, e))?;

    chart
        .configure_mesh()
        .x_desc("Core Frequency")
        .y_desc(y_desc)
        .draw()
        .map_err(|e| render_err(out, e))?;

    chart
        .draw_series(samples.iter().map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())))
        .map_err(|e| render_err(out, e))?;

    chart
        .draw_series(::std::iter::once(Cross::new(baseline, 5, BLACK.stroke_width(2))))
        .map_err(|e| render_err(out, e))?
        .label("default configuration")
        .legend(|(x, y)| Cross::new((x, y), 5, BLACK.stroke_width(2)));
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| render_err(out, e))?;

    root.present().map_err(|e| render_err(out, e))?;
    Ok(())
}
