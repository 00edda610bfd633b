use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Line, Plot, PlotBounds, PlotPoints};

use crate::chart::ChartSpec;
use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart panel (central)
// ---------------------------------------------------------------------------

/// Render every chart from the last run, one per file plus the combined
/// overlay at the bottom.
pub fn charts_panel(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Add torque files to begin  (File → Add data files…)");
        });
        return;
    };

    if report.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No charts produced; check the diagnostics on the left");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (index, chart) in report.file_charts.iter().enumerate() {
                ui.heading(&chart.title);
                chart_plot(ui, chart, index);
                ui.add_space(12.0);
                ui.separator();
            }

            if let Some(combined) = &report.combined_chart {
                ui.heading(&combined.title);
                chart_plot(ui, combined, report.file_charts.len());
            }
        });
}

// ---------------------------------------------------------------------------
// Single chart
// ---------------------------------------------------------------------------

/// Render one chart: the density histogram (if any) behind the fitted
/// curves. `salt` keeps plot ids unique within the panel.
pub fn chart_plot(ui: &mut Ui, chart: &ChartSpec, salt: usize) {
    let mut plot = Plot::new(("chart", salt))
        .legend(egui_plot::Legend::default())
        .x_axis_label(&chart.x_label)
        .y_axis_label(&chart.y_label)
        .show_grid(true)
        .height(320.0);

    if let Some(step) = chart.x_tick_step {
        plot = plot.x_grid_spacer(move |input: GridInput| fixed_step_marks(input, step));
    }

    // The bounds are pinned every frame below, so interactions are off.
    let fixed = chart.x_window.is_some() && chart.y_window.is_some();
    if fixed {
        plot = plot
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);
    }

    let x_window = chart.x_window;
    let y_window = chart.y_window;
    let palette = color::generate_palette(chart.curves.len());

    plot.show(ui, |plot_ui| {
        if let (Some((x0, x1)), Some((y0, y1))) = (x_window, y_window) {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x0, y0], [x1, y1]));
        }

        if let Some(histogram) = &chart.histogram {
            let bars: Vec<Bar> = histogram
                .bars
                .iter()
                .map(|bar| Bar::new(bar.center(), bar.height).width(bar.width()))
                .collect();
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(&histogram.label)
                    .color(color::histogram_fill()),
            );
        }

        for (index, curve) in chart.curves.iter().enumerate() {
            let points: PlotPoints = curve
                .x
                .iter()
                .zip(curve.y.iter())
                .map(|(&xi, &yi)| [xi, yi])
                .collect();

            // A lone curve over its histogram keeps the classic red; the
            // combined overlay cycles the palette instead.
            let color = if chart.histogram.is_some() {
                color::fitted_curve()
            } else {
                palette[index]
            };

            plot_ui.line(
                Line::new(points)
                    .name(&curve.label)
                    .color(color)
                    .width(2.0),
            );
        }
    });
}

/// Grid marks at every multiple of `step` inside the current bounds.
fn fixed_step_marks(input: GridInput, step: f64) -> Vec<GridMark> {
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let (min, max) = input.bounds;
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;

    // Cap the mark count for absurd windows.
    if last.saturating_sub(first) > 10_000 {
        return Vec::new();
    }

    (first..=last)
        .map(|i| GridMark {
            value: i as f64 * step,
            step_size: step,
        })
        .collect()
}
