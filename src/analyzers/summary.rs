use crate::analyzers::aggregate::{average_rating_per_park, count_per_park, park_location_averages};
use crate::analyzers::types::{AggregateSummary, ParkSummary};
use crate::dataset::Dataset;
use chrono::Utc;
use indexmap::IndexMap;
use tracing::debug;

/// Builds the per-park [`AggregateSummary`] consumed by the export layer.
///
/// Parks appear in the same order as [`count_per_park`].
pub fn summarize(dataset: &Dataset) -> AggregateSummary {
    let counts = count_per_park(dataset);
    let averages = average_rating_per_park(dataset);
    let by_location = park_location_averages(dataset);

    let parks: Vec<ParkSummary> = counts
        .into_iter()
        .map(|(park, review_count)| {
            let locations = by_location.get(&park);
            let top = locations.and_then(best_location);

            ParkSummary {
                average_rating: averages.get(&park).copied(),
                location_count: locations.map_or(0, IndexMap::len),
                top_location: top.map(|(location, _)| location.to_string()),
                top_location_average: top.map(|(_, avg)| avg),
                review_count,
                park,
            }
        })
        .collect();

    debug!(parks = parks.len(), total = dataset.len(), "Summary built");

    AggregateSummary {
        generated_at: Utc::now(),
        total_reviews: dataset.len(),
        parks,
    }
}

/// Highest-average location; the first one seen wins a tie.
fn best_location(locations: &IndexMap<String, f64>) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (location, &avg) in locations {
        if best.is_none_or(|(_, top)| avg > top) {
            best = Some((location.as_str(), avg));
        }
    }
    best
}
