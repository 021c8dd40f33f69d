use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Series colours: legend label → Color32
// ---------------------------------------------------------------------------

/// Stable colour per series label (stat names, special groups).
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
}

impl SeriesColors {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len()))
            .map(|(label, c)| (label.as_ref().to_string(), c))
            .collect();
        SeriesColors { mapping }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::LIGHT_BLUE)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

/// Blue (-1) through white (0) to red (+1); grey for undefined cells.
pub fn diverging(value: f64) -> Color32 {
    if !value.is_finite() {
        return Color32::from_gray(90);
    }
    let white: LinSrgb = Srgb::new(0.97f32, 0.97, 0.97).into_linear();
    let end: LinSrgb = if value < 0.0 {
        Srgb::new(0.23f32, 0.30, 0.75).into_linear()
    } else {
        Srgb::new(0.71f32, 0.02, 0.15).into_linear()
    };
    let t = value.abs().min(1.0) as f32;
    to_color32(Srgb::from_linear(white.mix(end, t)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        assert_ne!(colors[0], colors[3]);
    }

    #[test]
    fn series_colors_are_stable_with_fallback() {
        let colors = SeriesColors::new(&["hp", "attack"]);
        assert_eq!(colors.color_for("hp"), colors.color_for("hp"));
        assert_ne!(colors.color_for("hp"), colors.color_for("attack"));
        assert_eq!(colors.color_for("unknown"), Color32::LIGHT_BLUE);
    }

    #[test]
    fn diverging_ends_differ_and_nan_is_grey() {
        assert_ne!(diverging(-1.0), diverging(1.0));
        assert_eq!(diverging(f64::NAN), Color32::from_gray(90));
    }
}
