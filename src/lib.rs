//! TorqueFit analyzes torque measurement exports: each tab-separated file
//! is parsed, a seeded subset of one column is drawn, a normal distribution
//! is fitted to it, and the result is rendered as a density histogram with
//! the fitted curve overlaid. A combined chart compares the fitted curves
//! of every file in one place.
//!
//! The pipeline is usable without the UI:
//!
//! ```no_run
//! use torquefit::analysis::{self, AnalysisParams, InputFile};
//!
//! let file = InputFile {
//!     name: "run-a.tsv".to_string(),
//!     bytes: std::fs::read("run-a.tsv")?,
//! };
//! let report = analysis::run(&[file], &AnalysisParams::default())?;
//! println!("{} chart(s) produced", report.file_charts.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod app;
pub mod chart;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
