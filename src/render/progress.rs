//! Progress bar math: a clamped visual fill plus an unclamped numeric readout.

/// Display fill for one bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarFill {
    /// Fill percentage in `[0, 100]`.
    pub percent: f64,
    /// Filled width in whole pixels, `<= bar_width`.
    pub fill_px: u32,
}

impl BarFill {
    /// Compute the fill of a `bar_width`-pixel track.
    pub fn compute(value: f64, max: f64, bar_width: u32) -> Self {
        let percent = fill_percent(value, max);
        Self {
            percent,
            fill_px: fill_width(percent, bar_width),
        }
    }
}

/// `clamp(value / max * 100, 0, 100)`; zero, negative or non-finite `max` gives 0.
pub fn fill_percent(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// Pixels covered by `percent` of `bar_width`, rounded down.
pub fn fill_width(percent: f64, bar_width: u32) -> u32 {
    let px = (percent.clamp(0.0, 100.0) / 100.0 * f64::from(bar_width) + 1e-9).floor();
    (px as u32).min(bar_width)
}

/// `"floor(value) / max"`; the label is never clamped.
pub fn readout(value: f64, max: f64) -> String {
    format!("{} / {}", format_number(value.floor()), format_number(max))
}

/// Integers print without a decimal point; other values print as-is.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;
