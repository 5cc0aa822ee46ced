//! CLI entry point for the Park Review Analyzer.
//!
//! Without a subcommand the interactive menu runs; each subcommand runs a
//! single query against the reviews CSV and prints the result.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use park_review_analyzer::analyzers::{
    DEFAULT_TOP_N, average_rating_by_year, count_by_park_and_location, count_per_park,
    filter_by_park, monthly_averages, park_location_averages, summarize, top_locations_by_rating,
};
use park_review_analyzer::chart::{
    BAR_WIDTH, RATING_SCALE, bar_chart, monthly_chart, share_table,
};
use park_review_analyzer::config;
use park_review_analyzer::dataset::{self, Dataset};
use park_review_analyzer::menu::Menu;
use park_review_analyzer::output::{DEFAULT_FILE_STEM, ExportFormat, export, print_pretty};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "park_review_analyzer")]
#[command(about = "Explore theme-park review statistics", long_about = None)]
struct Cli {
    /// Reviews CSV (defaults to $REVIEWS_CSV, then data/Disneyland_reviews.csv)
    #[arg(short, long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (the default)
    Menu {
        /// Directory that exports are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// List every review for a park
    Reviews {
        #[arg(short, long)]
        park: String,
    },
    /// Count reviews of a park from a reviewer location
    Count {
        #[arg(short, long)]
        park: String,

        #[arg(short, long)]
        location: String,
    },
    /// Average rating of a park in a given year
    YearAverage {
        #[arg(short, long)]
        park: String,

        /// Four-digit year, e.g. 2019
        #[arg(short, long)]
        year: String,
    },
    /// Share of reviews per park
    PerPark,
    /// Reviewer locations with the highest average rating for a park
    TopLocations {
        #[arg(short, long)]
        park: String,

        /// Number of locations to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
    /// Average rating per calendar month for a park
    Monthly {
        #[arg(short, long)]
        park: String,
    },
    /// Average rating per reviewer location for every park
    ParkLocations,
    /// Export the per-park summary
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Directory to write the file to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// File name without extension
        #[arg(short, long, default_value = DEFAULT_FILE_STEM)]
        name: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/park_review_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("park_review_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let path = config::data_path(cli.data);
    let dataset = dataset::load(&path);
    if dataset.is_empty() {
        bail!(
            "Failed to load data. Please check the file path: {}",
            path.display()
        );
    }

    match cli.command.unwrap_or(Commands::Menu {
        output_dir: PathBuf::from("."),
    }) {
        Commands::Menu { output_dir } => {
            let stdin = io::stdin();
            let mut menu =
                Menu::new(&dataset, stdin.lock(), io::stdout()).with_export_dir(output_dir);
            menu.run()?;
        }
        Commands::Reviews { park } => print_reviews(&filter_by_park(&dataset, &park)),
        Commands::Count { park, location } => {
            let count = count_by_park_and_location(&dataset, &park, &location);
            println!("Number of reviews for {park} from {location}: {count}");
        }
        Commands::YearAverage { park, year } => {
            match average_rating_by_year(&dataset, &park, &year) {
                Some(avg) => println!("Average rating for {park} in {year}: {avg:.2}/5"),
                None => println!("No reviews found for {park} in {year}."),
            }
        }
        Commands::PerPark => {
            let counts = count_per_park(&dataset);
            print!(
                "{}",
                share_table(
                    "Distribution of Reviews per Park",
                    counts.iter().map(|(park, count)| (park.as_str(), *count)),
                )
            );
        }
        Commands::TopLocations { park, top_n } => {
            let top = top_locations_by_rating(&dataset, &park, top_n);
            if top.is_empty() {
                println!("No data found for park: {park}");
            } else {
                let title = format!("Top {} Locations by Average Rating for {park}", top.len());
                print!(
                    "{}",
                    bar_chart(
                        &title,
                        &top.locations[..],
                        &top.averages[..],
                        RATING_SCALE,
                        BAR_WIDTH
                    )
                );
            }
        }
        Commands::Monthly { park } => {
            let monthly = monthly_averages(&dataset, &park);
            match monthly_chart(&park, &monthly) {
                Some(chart) => print!("{chart}"),
                None => println!("No data found for park: {park}"),
            }
        }
        Commands::ParkLocations => {
            for (park, locations) in park_location_averages(&dataset) {
                println!("\nPARK: {park}");
                for (location, avg) in locations {
                    println!("  {location}: {avg:.2}/5");
                }
            }
        }
        Commands::Export {
            format,
            output_dir,
            name,
        } => {
            let summary = summarize(&dataset);
            print_pretty(&summary);
            let written = export(&summary, format, &output_dir, &name)?;
            info!(path = %written.display(), parks = summary.parks.len(), "Export complete");
            println!("Summary exported to {}", written.display());
        }
    }

    Ok(())
}

/// Prints every review in `reviews` with its park, rating, location and date.
fn print_reviews(reviews: &Dataset) {
    if reviews.is_empty() {
        println!("No reviews found.");
        return;
    }

    println!("Found {} reviews:", reviews.len());
    for (i, review) in reviews.iter().enumerate() {
        println!(
            "#{:<6} {:<24} {}/5  {:<24} {}",
            i + 1,
            review.branch(),
            review.rating(),
            review.reviewer_location(),
            review.year_month(),
        );
    }
}
