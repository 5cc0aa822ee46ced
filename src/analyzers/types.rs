//! Result shapes returned by the aggregation engine.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Calendar month labels, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Review count per raw branch name, in first-encounter order.
pub type ParkCounts = IndexMap<String, usize>;

/// Average rating per location, grouped by branch.
pub type ParkLocationAverages = IndexMap<String, IndexMap<String, f64>>;

/// Locations ranked by average rating, as two parallel sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopLocations {
    pub locations: Vec<String>,
    pub averages: Vec<f64>,
}

impl TopLocations {
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Average rating for each calendar month. Months without data hold `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverages {
    pub months: [&'static str; 12],
    pub averages: [f64; 12],
}

impl Default for MonthlyAverages {
    fn default() -> Self {
        Self {
            months: MONTH_NAMES,
            averages: [0.0; 12],
        }
    }
}

impl MonthlyAverages {
    /// True when at least one month has a non-zero average.
    pub fn has_data(&self) -> bool {
        self.averages.iter().sum::<f64>() > 0.0
    }
}

/// Per-park digest used by the export layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkSummary {
    pub park: String,
    pub review_count: usize,
    pub average_rating: Option<f64>,
    pub location_count: usize,
    pub top_location: Option<String>,
    pub top_location_average: Option<f64>,
}

/// Complete summary of a dataset, written out by [`crate::output::export`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub generated_at: DateTime<Utc>,
    pub total_reviews: usize,
    pub parks: Vec<ParkSummary>,
}
