use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

/// Fill for the sample histogram: sky blue at 60% opacity, translucent so
/// the fitted curve stays readable on top of it.
pub fn histogram_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(135, 206, 235, 153)
}

/// The fitted curve on a per-file chart.
pub fn fitted_curve() -> Color32 {
    Color32::RED
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// Used for the combined chart, where every file's curve needs its own
/// colour.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
