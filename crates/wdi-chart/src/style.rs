//! Shared drawing constants and helpers.

use plotters::style::RGBColor;

use wdi_model::Rgb;

/// Output size of every chart, in pixels.
pub const CHART_SIZE: (u32, u32) = (1000, 700);
pub const FONT: &str = "sans-serif";
pub const CAPTION_SIZE: i32 = 26;
pub const LABEL_SIZE: i32 = 16;

pub fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Axis range covering `values` with 5% padding on each side.
///
/// Falls back to `0..1` without finite values and widens a zero-width range.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (low, high) = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), value| {
            (low.min(value), high.max(value))
        });
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    if low == high {
        let pad = if low == 0.0 { 1.0 } else { low.abs() * 0.1 };
        return (low - pad, high + pad);
    }
    let pad = (high - low) * 0.05;
    (low - pad, high + pad)
}

/// Like [`padded_range`] but anchored at zero, for bars.
pub fn zero_based_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (low, high) = padded_range(values);
    (low.min(0.0), high.max(0.0))
}

/// Label for a category axis drawn at integer positions `0..labels.len()`.
pub fn category_label(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}
