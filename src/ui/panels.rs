use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::chart::AxisCalibration;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – analysis controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Sampling parameters ----
            ui.strong("Column");
            ui.text_edit_singleline(&mut state.column_name);
            ui.add_space(4.0);

            ui.horizontal(|ui: &mut Ui| {
                ui.label("Sample size");
                ui.add(DragValue::new(&mut state.sample_size).range(1..=100_000));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Seed");
                ui.add(DragValue::new(&mut state.seed));
            });
            ui.separator();

            // ---- Axis calibration ----
            ui.checkbox(&mut state.use_calibration, "Calibrated axes");
            if state.use_calibration {
                calibration_widgets(ui, &mut state.calibration);
            }
            ui.separator();

            if ui.button("Run analysis").clicked() {
                state.run_analysis();
            }
            ui.separator();

            // ---- Staged files ----
            staged_files(ui, state);

            // ---- Diagnostics from the last run ----
            diagnostics(ui, state);
        });
}

fn calibration_widgets(ui: &mut Ui, calibration: &mut AxisCalibration) {
    // Each edge is clamped by the other so the window cannot invert.
    let (left, right) = (calibration.x_min, calibration.x_max);
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Torque min");
        ui.add(
            DragValue::new(&mut calibration.x_min)
                .speed(0.05)
                .range(f64::NEG_INFINITY..=right),
        );
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Torque max");
        ui.add(
            DragValue::new(&mut calibration.x_max)
                .speed(0.05)
                .range(left..=f64::INFINITY),
        );
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Tick step");
        ui.add(
            DragValue::new(&mut calibration.x_tick_step)
                .speed(0.01)
                .range(0.01..=10.0),
        );
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Combined y max");
        ui.add(
            DragValue::new(&mut calibration.combined_y_max)
                .speed(0.1)
                .range(0.1..=1_000.0),
        );
    });
}

fn staged_files(ui: &mut Ui, state: &mut AppState) {
    ui.strong(format!("Files ({})", state.files.len()));
    if state.files.is_empty() {
        ui.label("No files staged.");
        return;
    }

    let mut remove: Option<usize> = None;
    for (index, file) in state.files.iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            if ui.small_button("✖").clicked() {
                remove = Some(index);
            }
            ui.label(&file.name);
        });
    }
    if let Some(index) = remove {
        state.remove_file(index);
    }
}

fn diagnostics(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        return;
    };
    if report.warnings.is_empty() && report.errors.is_empty() {
        return;
    }

    ui.separator();
    ui.strong("Diagnostics");
    for warning in &report.warnings {
        ui.label(RichText::new(warning.to_string()).color(Color32::GOLD));
    }
    for error in &report.errors {
        ui.label(RichText::new(error.to_string()).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Add data files…").clicked() {
                add_files_dialog(state);
                ui.close_menu();
            }
            if ui.button("Clear files").clicked() {
                state.clear_files();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Save calibration…").clicked() {
                save_calibration_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load calibration…").clicked() {
                load_calibration_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("{} file(s) staged", state.files.len()));
        if let Some(report) = &state.report {
            ui.separator();
            ui.label(format!("{} chart(s)", report.file_charts.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn add_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Add torque data")
        .add_filter("Tab-separated data", &["tsv", "txt", "csv"])
        .pick_files();

    if let Some(paths) = files {
        state.stage_paths(&paths);
    }
}

fn save_calibration_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save axis calibration")
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };

    match save_calibration(&path, &state.calibration) {
        Ok(()) => log::info!("saved calibration to {}", path.display()),
        Err(e) => {
            log::error!("failed to save calibration: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn load_calibration_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Load axis calibration")
        .add_filter("JSON", &["json"])
        .pick_file()
    else {
        return;
    };

    match load_calibration(&path) {
        Ok(calibration) => {
            log::info!("loaded calibration from {}", path.display());
            state.calibration = calibration;
            state.use_calibration = true;
        }
        Err(e) => {
            log::error!("failed to load calibration: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn save_calibration(path: &Path, calibration: &AxisCalibration) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(calibration)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn load_calibration(path: &Path) -> anyhow::Result<AxisCalibration> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}
