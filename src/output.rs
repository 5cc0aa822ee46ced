//! Export of the aggregate summary.
//!
//! Supports a plain-text report, one CSV row per park, and pretty JSON.

use anyhow::Result;
use clap::ValueEnum;
use csv::WriterBuilder;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::AggregateSummary;

/// File stem used when the caller does not pick one.
pub const DEFAULT_FILE_STEM: &str = "park_reviews_summary";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &AggregateSummary) {
    debug!("{:#?}", summary);
}

/// Writes `summary` to `dir/stem.<ext>` and returns the path written.
///
/// Creates `dir` if it does not exist.
pub fn export(
    summary: &AggregateSummary,
    format: ExportFormat,
    dir: impl AsRef<Path>,
    stem: &str,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", stem, format.extension()));

    match format {
        ExportFormat::Txt => fs::write(&path, render_text(summary))?,
        ExportFormat::Csv => write_csv(&path, summary)?,
        ExportFormat::Json => fs::write(&path, serde_json::to_string_pretty(summary)?)?,
    }

    info!(path = %path.display(), format = format.extension(), "Summary exported");
    Ok(path)
}

/// Renders the plain-text report.
pub fn render_text(summary: &AggregateSummary) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "PARK REVIEWS SUMMARY");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Generated: {}",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Total reviews: {}", summary.total_reviews);

    for park in &summary.parks {
        let _ = writeln!(out);
        let _ = writeln!(out, "Park: {}", park.park);
        let _ = writeln!(out, "{}", "-".repeat(30));
        let _ = writeln!(out, "Reviews: {}", park.review_count);
        let _ = writeln!(out, "Average rating: {}", fmt_rating(park.average_rating));
        let _ = writeln!(out, "Locations rated: {}", park.location_count);
        match (&park.top_location, park.top_location_average) {
            (Some(location), Some(avg)) => {
                let _ = writeln!(out, "Top location: {location} ({avg:.2}/5)");
            }
            _ => {
                let _ = writeln!(out, "Top location: n/a");
            }
        }
    }

    out
}

fn fmt_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}/5"))
}

fn write_csv(path: &Path, summary: &AggregateSummary) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    for park in &summary.parks {
        writer.serialize(park)?;
    }
    // with no rows, serialize never emits the header
    if summary.parks.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    writer.flush()?;

    Ok(())
}

const CSV_HEADER: [&str; 6] = [
    "park",
    "review_count",
    "average_rating",
    "location_count",
    "top_location",
    "top_location_average",
];
