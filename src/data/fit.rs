use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to fit a Gaussian to a sample.
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    /// Nothing to fit.
    #[error("cannot fit a distribution to an empty sample")]
    EmptySample,

    /// Every sampled value is identical, so the density has no width. The
    /// curve formula would divide by zero; we refuse instead of emitting
    /// infinities.
    #[error("all {count} sampled values equal {value}; distribution has zero variance")]
    DegenerateDistribution { value: f64, count: usize },

    /// The squared deviations overflow f64 (values of magnitude around
    /// 1e154 and up), so the density parameters cannot be computed.
    #[error("variance of {count} sampled values overflows f64")]
    NonFiniteVariance { count: usize },
}

// ---------------------------------------------------------------------------
// FitResult
// ---------------------------------------------------------------------------

/// Number of points the density curve is evaluated at.
pub const CURVE_POINTS: usize = 1000;

/// Half-width of the curve domain, in standard deviations around the mean.
pub const SIGMA_SPAN: f64 = 4.0;

/// A Gaussian fitted to one sample, with its density curve pre-evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Arithmetic mean of the sample.
    pub mean: f64,
    /// Population standard deviation (sum of squared deviations over N).
    pub std_dev: f64,
    /// Curve domain: [`CURVE_POINTS`] evenly spaced points spanning
    /// mean ± [`SIGMA_SPAN`]·std_dev, endpoints included.
    pub x: Vec<f64>,
    /// Density value at each point of `x`. Always positive.
    pub y: Vec<f64>,
}

impl FitResult {
    /// Legend text for this fit, parameters to four decimal places.
    pub fn stats_label(&self) -> String {
        format!("μ={:.4}, σ={:.4}", self.mean, self.std_dev)
    }
}

// ---------------------------------------------------------------------------
// Fitting
// ---------------------------------------------------------------------------

/// Fit a normal distribution to the sample and evaluate its density curve.
///
/// The standard deviation is the population estimator (divide by N, not
/// N−1), matching the convention of the rest of the pipeline. A sample whose
/// values are all identical (including a single-value sample) is rejected as
/// [`FitError::DegenerateDistribution`] rather than producing a division by
/// zero, and one whose spread overflows f64 is rejected as
/// [`FitError::NonFiniteVariance`] rather than producing an infinite or NaN
/// curve. On success every value in `x` and `y` is finite.
pub fn fit(values: &[f64]) -> Result<FitResult, FitError> {
    if values.is_empty() {
        return Err(FitError::EmptySample);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    // Finite cells can still overflow here; an infinite variance would
    // poison every curve point downstream.
    if !variance.is_finite() {
        return Err(FitError::NonFiniteVariance {
            count: values.len(),
        });
    }

    let std_dev = variance.sqrt();

    if std_dev <= 0.0 {
        return Err(FitError::DegenerateDistribution {
            value: mean,
            count: values.len(),
        });
    }

    let lo = mean - SIGMA_SPAN * std_dev;
    let hi = mean + SIGMA_SPAN * std_dev;
    let step = (hi - lo) / (CURVE_POINTS - 1) as f64;

    let x: Vec<f64> = (0..CURVE_POINTS).map(|i| lo + i as f64 * step).collect();
    let norm = 1.0 / (std_dev * (2.0 * PI).sqrt());
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| {
            let z = (xi - mean) / std_dev;
            norm * (-0.5 * z * z).exp()
        })
        .collect();

    Ok(FitResult { mean, std_dev, x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn mean_and_population_std_dev() {
        // Population formula: variance of [2, 4, 4, 4, 5, 5, 7, 9] is 4
        // when dividing by N (it would be 4.571... with N−1).
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let fit = fit(&values).unwrap();
        assert!((fit.mean - 5.0).abs() < EPS);
        assert!((fit.std_dev - 2.0).abs() < EPS);
    }

    #[test]
    fn curve_spans_four_sigma_with_1000_points() {
        let values = [0.1, 0.2, 0.15, 0.18, 0.12];
        let fit = fit(&values).unwrap();
        assert_eq!(fit.x.len(), CURVE_POINTS);
        assert_eq!(fit.y.len(), CURVE_POINTS);
        assert!((fit.x[0] - (fit.mean - 4.0 * fit.std_dev)).abs() < EPS);
        assert!((fit.x[CURVE_POINTS - 1] - (fit.mean + 4.0 * fit.std_dev)).abs() < EPS);

        // Evenly spaced.
        let step = fit.x[1] - fit.x[0];
        for pair in fit.x.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn density_is_positive_and_peaks_at_the_mean() {
        let values = [0.1, 0.2, 0.15, 0.18, 0.12, 0.22];
        let fit = fit(&values).unwrap();
        assert!(fit.y.iter().all(|&y| y > 0.0));

        let peak_idx = fit
            .y
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!((fit.x[peak_idx] - fit.mean).abs() < fit.std_dev * 0.01);
    }

    #[test]
    fn density_integrates_to_one_over_the_window() {
        let values = [0.1, 0.2, 0.15, 0.18, 0.12, 0.22, 0.19];
        let fit = fit(&values).unwrap();

        // Trapezoidal rule; the ±4σ window carries 99.99% of the mass.
        let mut area = 0.0;
        for i in 1..fit.x.len() {
            area += 0.5 * (fit.y[i] + fit.y[i - 1]) * (fit.x[i] - fit.x[i - 1]);
        }
        assert!((area - 1.0).abs() < 1e-3, "area was {area}");
    }

    #[test]
    fn stats_label_uses_four_decimals() {
        let fit = fit(&[0.1, 0.2, 0.15, 0.18]).unwrap();
        let label = fit.stats_label();
        assert!(label.starts_with("μ=0.1575"), "label was {label}");
        assert!(label.contains("σ=0.03"), "label was {label}");
    }

    #[test]
    fn empty_sample_is_rejected() {
        assert!(matches!(fit(&[]), Err(FitError::EmptySample)));
    }

    #[test]
    fn zero_variance_is_rejected() {
        assert!(matches!(
            fit(&[0.5, 0.5, 0.5]),
            Err(FitError::DegenerateDistribution { count: 3, .. })
        ));
        // A single value has zero variance by definition.
        assert!(matches!(
            fit(&[0.5]),
            Err(FitError::DegenerateDistribution { count: 1, .. })
        ));
    }

    #[test]
    fn overflowing_variance_is_rejected() {
        // Both cells are finite, but their squared deviations are not:
        // (1e160)^2 is past f64::MAX, so the variance comes out infinite.
        // Must not fit to std_dev = inf and hand back a NaN curve.
        assert!(matches!(
            fit(&[1e160, -1e160]),
            Err(FitError::NonFiniteVariance { count: 2 })
        ));

        // Same failure when the mean itself overflows.
        assert!(matches!(
            fit(&[f64::MAX, f64::MAX, -1.0]),
            Err(FitError::NonFiniteVariance { count: 3 })
        ));
    }
}
