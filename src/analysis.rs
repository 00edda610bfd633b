use std::fmt;

use crate::chart::{AxisCalibration, ChartSpec, CombinedChartBuilder};
use crate::data::fit::{self, FitError, FitResult};
use crate::data::loader::{self, LoadError};
use crate::data::sampler::{self, SampleError};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Column the torque measurements live in, unless the engineer says
/// otherwise.
pub const DEFAULT_COLUMN: &str = "Actual Torque [of nominal]";

/// Default number of measurements drawn per file.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Default sampling seed; fixed so reruns over the same files agree.
pub const DEFAULT_SEED: u64 = 42;

/// One staged input: raw file bytes plus the name shown in diagnostics and
/// chart titles.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Parameters for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    /// Header of the column to sample.
    pub column_name: String,
    /// How many values to draw per file.
    pub sample_size: usize,
    /// Seed for the per-file sampling RNG.
    pub seed: u64,
    /// Fixed axis window, or `None` to let every chart fit its data.
    pub calibration: Option<AxisCalibration>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            column_name: DEFAULT_COLUMN.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            calibration: Some(AxisCalibration::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// A user-visible message tied to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    pub file: String,
    pub message: String,
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    /// One chart per successfully processed file, in input order.
    pub file_charts: Vec<ChartSpec>,
    /// The cross-file comparison chart. Present whenever the run did any
    /// work, even if no file succeeded (it then simply has no curves).
    pub combined_chart: Option<ChartSpec>,
    /// Non-fatal notices (short files).
    pub warnings: Vec<FileDiagnostic>,
    /// Per-file failures. Never aborted the run.
    pub errors: Vec<FileDiagnostic>,
}

impl AnalysisReport {
    /// True when the run produced nothing at all (no files or no column).
    pub fn is_empty(&self) -> bool {
        self.file_charts.is_empty()
            && self.combined_chart.is_none()
            && self.warnings.is_empty()
            && self.errors.is_empty()
    }
}

/// Rejection of the run as a whole, before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The sample size must be a positive integer.
    #[error("sample size must be at least 1")]
    InvalidSampleSize,
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Everything that can go wrong for a single file. Each variant's message is
/// rendered after the file name in the report.
#[derive(Debug, thiserror::Error)]
enum FileError {
    #[error("{0}")]
    Load(#[from] LoadError),
    #[error("{0}")]
    Sample(#[from] SampleError),
    #[error("{0}")]
    Fit(#[from] FitError),
}

struct FileOutcome {
    chart: ChartSpec,
    fit: FitResult,
    shortfall: Option<String>,
}

/// Run the full pipeline over every staged file.
///
/// Files are processed strictly in order; a failing file is recorded and
/// skipped, never aborting the rest. Every successful fit contributes one
/// curve to the combined chart, which is finalized once after the loop.
///
/// An empty column name or an empty file list short-circuits into an empty
/// report; a zero sample size is a caller error rejected up front.
pub fn run(files: &[InputFile], params: &AnalysisParams) -> Result<AnalysisReport, AnalysisError> {
    if params.sample_size == 0 {
        return Err(AnalysisError::InvalidSampleSize);
    }

    let column = params.column_name.trim();
    if column.is_empty() || files.is_empty() {
        return Ok(AnalysisReport::default());
    }

    log::info!(
        "analyzing {} file(s): column '{}', n={}, seed={}",
        files.len(),
        column,
        params.sample_size,
        params.seed
    );

    let mut report = AnalysisReport::default();
    let mut combined = CombinedChartBuilder::new(params.calibration.as_ref());

    for file in files {
        match analyze_file(file, column, params) {
            Ok(outcome) => {
                log::info!("{}: fitted {}", file.name, outcome.fit.stats_label());
                if let Some(message) = outcome.shortfall {
                    log::warn!("{}: {message}", file.name);
                    report.warnings.push(FileDiagnostic {
                        file: file.name.clone(),
                        message,
                    });
                }
                combined.add_curve(&outcome.fit, &file.name);
                report.file_charts.push(outcome.chart);
            }
            Err(e) => {
                log::error!("{}: {e}", file.name);
                report.errors.push(FileDiagnostic {
                    file: file.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    report.combined_chart = Some(combined.finish());
    Ok(report)
}

/// One file through loader → sampler → fit → chart.
fn analyze_file(
    file: &InputFile,
    column: &str,
    params: &AnalysisParams,
) -> Result<FileOutcome, FileError> {
    let table = loader::parse_tsv(&file.bytes)?;
    let sample = sampler::sample_column(&table, column, params.sample_size, params.seed)?;

    let shortfall = sample.is_truncated().then(|| {
        format!(
            "only {} of {} requested data points available; using all of them",
            sample.available, sample.requested
        )
    });

    let fit = fit::fit(&sample.values)?;
    let chart = ChartSpec::single(
        &sample,
        &fit,
        column,
        &file.name,
        params.calibration.as_ref(),
    );

    Ok(FileOutcome {
        chart,
        fit,
        shortfall,
    })
}
