//! Text menu for browsing, charting and exporting review statistics.
//!
//! The menu reads choices from any [`BufRead`] and prints to any [`Write`],
//! so it can be driven by stdin/stdout or by tests. End of input behaves
//! like choosing exit.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error};

use crate::analyzers::{
    DEFAULT_TOP_N, average_rating_by_year, count_by_park_and_location, count_per_park,
    filter_by_park, monthly_averages, park_location_averages, summarize, top_locations_by_rating,
};
use crate::chart::{BAR_WIDTH, RATING_SCALE, bar_chart, monthly_chart, share_table};
use crate::dataset::Dataset;
use crate::output::{DEFAULT_FILE_STEM, ExportFormat, export};

const RULE_WIDTH: usize = 60;

/// Locations listed per park in the park/location averages view.
const LOCATIONS_PREVIEW: usize = 5;

/// Where control goes after a sub-menu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Back,
    Quit,
}

pub struct Menu<'a, R, W> {
    dataset: &'a Dataset,
    input: R,
    output: W,
    export_dir: PathBuf,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(dataset: &'a Dataset, input: R, output: W) -> Self {
        Self {
            dataset,
            input,
            output,
            export_dir: PathBuf::from("."),
        }
    }

    /// Directory that exports are written to.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Consumes the menu and returns its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the main menu loop until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        self.welcome()?;

        loop {
            self.header(
                "MAIN MENU",
                &["[A] View Data", "[B] Visualise Data", "[C] Export Data", "[X] Exit"],
            )?;
            let Some(choice) = self.choice(&["A", "B", "C", "X"])? else {
                break;
            };
            debug!(choice = %choice, "Main menu choice");

            let step = match choice.as_str() {
                "A" => {
                    writeln!(self.output, "You selected: [A] View Data")?;
                    self.view_data()?
                }
                "B" => {
                    writeln!(self.output, "You selected: [B] Visualise Data")?;
                    self.visualise()?
                }
                "C" => {
                    writeln!(self.output, "You selected: [C] Export Data")?;
                    self.export_menu()?
                }
                _ => break,
            };
            if step == Step::Quit {
                break;
            }
        }

        writeln!(self.output, "Thank you for using the Park Reviews Analysis System!")?;
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn view_data(&mut self) -> Result<Step> {
        loop {
            self.header(
                "VIEW DATA MENU",
                &[
                    "[1] Display all reviews for a specific park",
                    "[2] Count reviews by park and location",
                    "[3] Average rating by park and year",
                    "[4] Average score per park by reviewer location",
                    "[X] Return to main menu",
                ],
            )?;
            let Some(choice) = self.choice(&["1", "2", "3", "4", "X"])? else {
                return Ok(Step::Quit);
            };

            match choice.as_str() {
                "1" => {
                    let Some(park) = self.ask("Enter park name: ")? else {
                        return Ok(Step::Quit);
                    };
                    let reviews = filter_by_park(self.dataset, &park);
                    self.display_reviews(&reviews)?;
                }
                "2" => {
                    let Some(park) = self.ask("Enter park name: ")? else {
                        return Ok(Step::Quit);
                    };
                    let Some(location) = self.ask("Enter reviewer location: ")? else {
                        return Ok(Step::Quit);
                    };
                    let count = count_by_park_and_location(self.dataset, &park, &location);
                    writeln!(
                        self.output,
                        "\nNumber of reviews for {park} from {location}: {count}"
                    )?;
                }
                "3" => {
                    let Some(park) = self.ask("Enter park name: ")? else {
                        return Ok(Step::Quit);
                    };
                    let Some(year) = self.ask("Enter year (YYYY): ")? else {
                        return Ok(Step::Quit);
                    };
                    match average_rating_by_year(self.dataset, &park, &year) {
                        Some(avg) => writeln!(
                            self.output,
                            "\nAverage rating for {park} in {year}: {avg:.2}/5"
                        )?,
                        None => writeln!(self.output, "\nNo reviews found for {park} in {year}.")?,
                    }
                }
                "4" => self.display_park_location_averages()?,
                _ => return Ok(Step::Back),
            }
        }
    }

    fn visualise(&mut self) -> Result<Step> {
        loop {
            self.header(
                "VISUALISE DATA MENU",
                &[
                    "[1] Chart - Reviews per park",
                    "[2] Chart - Top 10 locations by rating",
                    "[3] Chart - Average rating by month",
                    "[X] Return to main menu",
                ],
            )?;
            let Some(choice) = self.choice(&["1", "2", "3", "X"])? else {
                return Ok(Step::Quit);
            };

            match choice.as_str() {
                "1" => {
                    let counts = count_per_park(self.dataset);
                    let table = share_table(
                        "Distribution of Reviews per Park",
                        counts.iter().map(|(park, count)| (park.as_str(), *count)),
                    );
                    write!(self.output, "\n{table}")?;
                }
                "2" => {
                    let Some(park) = self.ask("Enter park name: ")? else {
                        return Ok(Step::Quit);
                    };
                    let top = top_locations_by_rating(self.dataset, &park, DEFAULT_TOP_N);
                    if top.is_empty() {
                        writeln!(self.output, "No data found for park: {park}")?;
                    } else {
                        let title = format!(
                            "Top {} Locations by Average Rating for {park}",
                            top.len()
                        );
                        let chart = bar_chart(
                            &title,
                            &top.locations[..],
                            &top.averages[..],
                            RATING_SCALE,
                            BAR_WIDTH,
                        );
                        write!(self.output, "\n{chart}")?;
                    }
                }
                "3" => {
                    let Some(park) = self.ask("Enter park name: ")? else {
                        return Ok(Step::Quit);
                    };
                    let monthly = monthly_averages(self.dataset, &park);
                    match monthly_chart(&park, &monthly) {
                        Some(chart) => write!(self.output, "\n{chart}")?,
                        None => writeln!(self.output, "No data found for park: {park}")?,
                    }
                }
                _ => return Ok(Step::Back),
            }
        }
    }

    fn export_menu(&mut self) -> Result<Step> {
        let summary = summarize(self.dataset);

        loop {
            self.header(
                "EXPORT DATA MENU",
                &[
                    "[1] Export as TXT",
                    "[2] Export as CSV",
                    "[3] Export as JSON",
                    "[X] Return to main menu",
                ],
            )?;
            let Some(choice) = self.choice(&["1", "2", "3", "X"])? else {
                return Ok(Step::Quit);
            };

            let format = match choice.as_str() {
                "1" => ExportFormat::Txt,
                "2" => ExportFormat::Csv,
                "3" => ExportFormat::Json,
                _ => return Ok(Step::Back),
            };

            match export(&summary, format, &self.export_dir, DEFAULT_FILE_STEM) {
                Ok(path) => writeln!(self.output, "✓ Summary exported to {}", path.display())?,
                Err(e) => {
                    error!(error = %e, "Export failed");
                    self.display_error(&format!("Export failed: {e}"))?;
                }
            }
        }
    }

    fn display_reviews(&mut self, reviews: &Dataset) -> Result<()> {
        if reviews.is_empty() {
            writeln!(self.output, "\nNo reviews found.")?;
            return Ok(());
        }

        writeln!(self.output, "\nFound {} reviews:", reviews.len())?;
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        for (i, review) in reviews.iter().enumerate() {
            let field = |name| review.get(name).unwrap_or("N/A");
            writeln!(self.output, "Review #{}", i + 1)?;
            writeln!(self.output, "Park: {}", field("Branch"))?;
            writeln!(self.output, "Rating: {}/5", field("Rating"))?;
            writeln!(self.output, "Location: {}", field("Reviewer_Location"))?;
            writeln!(self.output, "Date: {}", field("Year_Month"))?;
            writeln!(self.output, "{}", "-".repeat(30))?;
        }
        Ok(())
    }

    fn display_park_location_averages(&mut self) -> Result<()> {
        writeln!(self.output, "Calculating average scores per park by location...")?;
        let results = park_location_averages(self.dataset);

        for (park, locations) in &results {
            writeln!(self.output, "\nPARK: {park}")?;
            writeln!(self.output, "{}", "-".repeat(30))?;

            let mut sorted: Vec<_> = locations.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (location, avg) in sorted.iter().take(LOCATIONS_PREVIEW) {
                writeln!(self.output, "{location}: {avg:.2}/5")?;
            }
            if locations.len() > LOCATIONS_PREVIEW {
                writeln!(
                    self.output,
                    "... and {} more locations.",
                    locations.len() - LOCATIONS_PREVIEW
                )?;
            }
        }
        Ok(())
    }

    fn welcome(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "  Park Reviews Analysis System")?;
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "Total number of reviews: {}", self.dataset.len())?;
        Ok(())
    }

    fn header(&mut self, title: &str, options: &[&str]) -> Result<()> {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{rule}")?;
        writeln!(self.output, "  {title}")?;
        writeln!(self.output, "{rule}")?;
        for option in options {
            writeln!(self.output, "  {option}")?;
        }
        writeln!(self.output, "{rule}")?;
        Ok(())
    }

    fn display_error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "\n⚠ ERROR: {message}\n")?;
        Ok(())
    }

    /// Prompts and reads one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts until one of `valid` (case-insensitive) is entered.
    fn choice(&mut self, valid: &[&str]) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.ask("\nPlease enter your choice: ")? else {
                return Ok(None);
            };
            let answer = answer.to_uppercase();
            if valid.contains(&answer.as_str()) {
                return Ok(Some(answer));
            }
            self.display_error(&format!(
                "Invalid choice '{answer}'. Please enter one of: {}.",
                valid.join(", ")
            ))?;
        }
    }
}
