//! Text charts for terminal output.
//!
//! Renders the shapes returned by the aggregation engine; no computation
//! beyond scaling happens here.

use std::fmt::Write as _;

use crate::analyzers::types::MonthlyAverages;

/// Ratings are plotted against this ceiling so bars are comparable.
pub const RATING_SCALE: f64 = 5.0;

/// Default bar width in characters.
pub const BAR_WIDTH: usize = 40;

/// Horizontal bar chart of `values`, one row per label.
///
/// Bars are scaled against `scale_max`; values outside `0..=scale_max`
/// are clamped.
pub fn bar_chart<L: AsRef<str>>(
    title: &str,
    labels: &[L],
    values: &[f64],
    scale_max: f64,
    width: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");

    let label_width = labels
        .iter()
        .map(|l| l.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    for (label, &value) in labels.iter().zip(values) {
        let _ = writeln!(
            out,
            "{:<label_width$} | {:<width$} {:.2}",
            label.as_ref(),
            bar(value, scale_max, width),
            value,
        );
    }

    out
}

/// Monthly average chart for `park`, or `None` when every month is zero.
pub fn monthly_chart(park: &str, monthly: &MonthlyAverages) -> Option<String> {
    if !monthly.has_data() {
        return None;
    }
    Some(bar_chart(
        &format!("Average Monthly Rating for {park}"),
        &monthly.months[..],
        &monthly.averages[..],
        RATING_SCALE,
        BAR_WIDTH,
    ))
}

/// Share of each group in the total, as a pie chart would label it.
pub fn share_table<'a>(title: &str, counts: impl IntoIterator<Item = (&'a str, usize)>) -> String {
    let counts: Vec<_> = counts.into_iter().collect();
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    let mut out = String::new();
    let _ = writeln!(out, "{title}");

    let label_width = counts
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);

    for (label, count) in &counts {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64 * 100.0
        };
        let _ = writeln!(out, "{label:<label_width$} | {count:>8} | {share:>5.1}%");
    }

    out
}

fn bar(value: f64, scale_max: f64, width: usize) -> String {
    if scale_max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let ratio = (value / scale_max).clamp(0.0, 1.0);
    "#".repeat((ratio * width as f64).round() as usize)
}
