use serde::{Deserialize, Serialize};

use crate::data::fit::FitResult;
use crate::data::sampler::Sample;

// ---------------------------------------------------------------------------
// Axis calibration
// ---------------------------------------------------------------------------

/// Fixed chart window for normalized torque data.
///
/// The defaults suit torque-of-nominal exports, where values fall in
/// [−1.75, 1.0] and combined density peaks stay below 6. Data outside the
/// window is silently out of frame; callers can edit the window or drop it
/// entirely for auto-fitting axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    /// Left edge of the x window.
    pub x_min: f64,
    /// Right edge of the x window.
    pub x_max: f64,
    /// Spacing of the x-axis ticks.
    pub x_tick_step: f64,
    /// Top of the combined chart's y window (bottom is 0).
    pub combined_y_max: f64,
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self {
            x_min: -1.75,
            x_max: 1.0,
            x_tick_step: 0.25,
            combined_y_max: 6.0,
        }
    }
}

impl AxisCalibration {
    /// The x window as an ordered `(left, right)` pair. The two edges are
    /// edited and stored independently, so a crossed pair (min above max)
    /// can reach us; the smaller edge is always returned first.
    pub fn x_window(&self) -> (f64, f64) {
        ordered(self.x_min, self.x_max)
    }

    /// Combined-chart y window, bottom at 0 unless the stored top is
    /// negative.
    pub fn combined_y_window(&self) -> (f64, f64) {
        ordered(0.0, self.combined_y_max)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Number of buckets in a sample histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// One histogram bucket: a half-open value range and its density height.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBar {
    pub start: f64,
    pub end: f64,
    /// Density height: bucket count / (sample size · bucket width).
    pub height: f64,
}

impl HistogramBar {
    pub fn center(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// A density-normalized histogram series: total bar area is 1, so it can be
/// overlaid directly on a probability density curve.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    /// Legend entry.
    pub label: String,
    pub bars: Vec<HistogramBar>,
}

impl HistogramSeries {
    /// Bucket `values` into [`HISTOGRAM_BINS`] equal-width density bars over
    /// the sample's own value range.
    pub fn density(label: &str, values: &[f64]) -> Self {
        let mut bars = Vec::new();
        if !values.is_empty() {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &v in values {
                min = min.min(v);
                max = max.max(v);
            }

            // Zero range (all values equal): fall back to a unit-wide
            // window so the single bar stays well-formed.
            let mut width = (max - min) / HISTOGRAM_BINS as f64;
            if width <= 0.0 {
                width = 1.0 / HISTOGRAM_BINS as f64;
                min -= 0.5;
            }

            let mut counts = [0u32; HISTOGRAM_BINS];
            for &v in values {
                let idx = (((v - min) / width) as usize).min(HISTOGRAM_BINS - 1);
                counts[idx] += 1;
            }

            let scale = 1.0 / (values.len() as f64 * width);
            bars = counts
                .iter()
                .enumerate()
                .map(|(i, &count)| HistogramBar {
                    start: min + i as f64 * width,
                    end: min + (i + 1) as f64 * width,
                    height: count as f64 * scale,
                })
                .collect();
        }

        HistogramSeries {
            label: label.to_string(),
            bars,
        }
    }

    /// Total bar area (≈ 1 for a density histogram of a non-empty sample).
    pub fn area(&self) -> f64 {
        self.bars.iter().map(|b| b.height * b.width()).sum()
    }

    fn peak(&self) -> f64 {
        self.bars.iter().map(|b| b.height).fold(0.0, f64::max)
    }
}

/// A labelled fitted-density curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSeries {
    /// Legend entry, carrying μ/σ to four decimal places.
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl CurveSeries {
    fn peak(&self) -> f64 {
        self.y.iter().copied().fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// A fully described chart, ready for any renderer to draw.
///
/// Everything the view needs is plain data: series, labels, legend text and
/// the axis window. `None` windows mean "fit the view to the data".
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: Option<HistogramSeries>,
    pub curves: Vec<CurveSeries>,
    /// Fixed x view, left and right edges.
    pub x_window: Option<(f64, f64)>,
    /// Fixed x tick spacing.
    pub x_tick_step: Option<f64>,
    /// Fixed y view, bottom and top edges.
    pub y_window: Option<(f64, f64)>,
}

impl ChartSpec {
    /// Build the per-file chart: the sample's density histogram overlaid
    /// with its fitted curve.
    pub fn single(
        sample: &Sample,
        fit: &FitResult,
        column_label: &str,
        source_label: &str,
        calibration: Option<&AxisCalibration>,
    ) -> Self {
        let histogram = HistogramSeries::density("Data Histogram", &sample.values);
        let curve = CurveSeries {
            label: format!("Normal Distribution ({})", fit.stats_label()),
            x: fit.x.clone(),
            y: fit.y.clone(),
        };

        // Calibration pins the x window; the y frame hugs the data, from 0
        // to a hair above the tallest series.
        let y_peak = histogram.peak().max(curve.peak());
        ChartSpec {
            title: format!("Normal Distribution of ({source_label})"),
            x_label: column_label.to_string(),
            y_label: "Density".to_string(),
            histogram: Some(histogram),
            curves: vec![curve],
            x_window: calibration.map(AxisCalibration::x_window),
            x_tick_step: calibration.map(|c| c.x_tick_step),
            y_window: calibration.map(|_| (0.0, y_peak * 1.05)),
        }
    }
}

// ---------------------------------------------------------------------------
// Combined chart accumulator
// ---------------------------------------------------------------------------

/// Accumulates one fitted curve per successfully processed file into the
/// single cross-file comparison chart.
///
/// This is an explicit value the analysis loop owns and finalizes once, not
/// shared drawing state.
#[derive(Debug, Clone)]
pub struct CombinedChartBuilder {
    curves: Vec<CurveSeries>,
    calibration: Option<AxisCalibration>,
}

impl CombinedChartBuilder {
    pub fn new(calibration: Option<&AxisCalibration>) -> Self {
        CombinedChartBuilder {
            curves: Vec::new(),
            calibration: calibration.copied(),
        }
    }

    /// Add one file's fitted curve, labelled with the file name and its
    /// fit parameters.
    pub fn add_curve(&mut self, fit: &FitResult, source_label: &str) {
        self.curves.push(CurveSeries {
            label: format!("{source_label} ({})", fit.stats_label()),
            x: fit.x.clone(),
            y: fit.y.clone(),
        });
    }

    /// Number of curves accumulated so far.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Finalize into the histogram-free comparison chart.
    pub fn finish(self) -> ChartSpec {
        ChartSpec {
            title: "Combined Normal Distribution of All Files".to_string(),
            x_label: "Torque".to_string(),
            y_label: "Density".to_string(),
            histogram: None,
            curves: self.curves,
            x_window: self.calibration.map(|c| c.x_window()),
            x_tick_step: self.calibration.map(|c| c.x_tick_step),
            y_window: self.calibration.map(|c| c.combined_y_window()),
        }
    }
}
