use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analysis::{self, AnalysisParams, AnalysisReport, InputFile};
use crate::chart::AxisCalibration;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Files staged for analysis, in upload order.
    pub files: Vec<InputFile>,

    /// Header of the column to sample.
    pub column_name: String,

    /// Number of measurements drawn per file.
    pub sample_size: usize,

    /// Sampling seed; fixed by default so reruns agree.
    pub seed: u64,

    /// Whether charts use the fixed torque window or fit their data.
    pub use_calibration: bool,

    /// The fixed window, editable in the side panel.
    pub calibration: AxisCalibration,

    /// Results of the last run (None until the first run).
    pub report: Option<AnalysisReport>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            column_name: analysis::DEFAULT_COLUMN.to_string(),
            sample_size: analysis::DEFAULT_SAMPLE_SIZE,
            seed: analysis::DEFAULT_SEED,
            use_calibration: true,
            calibration: AxisCalibration::default(),
            report: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// The analysis parameters as currently configured.
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            column_name: self.column_name.clone(),
            sample_size: self.sample_size,
            seed: self.seed,
            calibration: self.use_calibration.then_some(self.calibration),
        }
    }

    /// Stage the files behind `paths`, reading each into memory.
    ///
    /// A path that cannot be read is reported and skipped; the rest are
    /// still staged.
    pub fn stage_paths(&mut self, paths: &[PathBuf]) {
        for path in paths {
            match read_staged_file(path) {
                Ok(file) => {
                    log::info!("staged {} ({} bytes)", file.name, file.bytes.len());
                    self.files.push(file);
                }
                Err(e) => {
                    log::error!("failed to stage file: {e:#}");
                    self.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }
    }

    /// Unstage one file.
    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    /// Unstage everything and forget the last report.
    pub fn clear_files(&mut self) {
        self.files.clear();
        self.report = None;
    }

    /// Run the analysis over the staged files and keep the report.
    pub fn run_analysis(&mut self) {
        self.status_message = None;
        match analysis::run(&self.files, &self.params()) {
            Ok(report) => {
                if report.is_empty() {
                    self.status_message =
                        Some("Nothing to analyze: stage files and set a column name".to_string());
                } else {
                    log::info!(
                        "run finished: {} chart(s), {} warning(s), {} error(s)",
                        report.file_charts.len(),
                        report.warnings.len(),
                        report.errors.len()
                    );
                }
                self.report = Some(report);
            }
            Err(e) => {
                log::error!("analysis rejected: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File staging
// ---------------------------------------------------------------------------

fn read_staged_file(path: &Path) -> Result<InputFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(InputFile { name, bytes })
}
