use crate::analyzers::types::{MonthlyAverages, ParkCounts, ParkLocationAverages, TopLocations};
use crate::analyzers::utility::{Bucket, matches, normalize, parse_int};
use crate::dataset::{BRANCH, Dataset, REVIEWER_LOCATION};
use indexmap::IndexMap;

/// Number of locations returned by [`top_locations_by_rating`] in the menu.
pub const DEFAULT_TOP_N: usize = 10;

/// Counts reviews per raw branch name. Every record lands in one group.
pub fn count_per_park(dataset: &Dataset) -> ParkCounts {
    let mut counts = ParkCounts::new();
    for review in dataset {
        *counts
            .entry(review.group_key(BRANCH).to_string())
            .or_default() += 1;
    }
    counts
}

/// Ranks the reviewer locations of `park` by average rating.
///
/// Highest average first; equal averages keep the order in which their
/// location was first seen. At most `top_n` locations are returned.
pub fn top_locations_by_rating(dataset: &Dataset, park: &str, top_n: usize) -> TopLocations {
    let target = normalize(park);
    if target.is_empty() {
        return TopLocations::default();
    }

    let mut buckets: IndexMap<&str, Bucket> = IndexMap::new();
    for review in dataset {
        if !matches(review.branch(), &target) {
            continue;
        }
        let Some(rating) = parse_int(review.rating()) else {
            continue;
        };
        buckets
            .entry(review.group_key(REVIEWER_LOCATION))
            .or_default()
            .add(rating);
    }

    let mut ranked: Vec<(&str, f64)> = buckets
        .into_iter()
        .filter_map(|(location, bucket)| bucket.average().map(|avg| (location, avg)))
        .collect();
    // sort_by is stable, so ties stay in encounter order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_n);

    let (locations, averages): (Vec<String>, Vec<f64>) = ranked
        .into_iter()
        .map(|(location, avg)| (location.to_string(), avg))
        .unzip();

    TopLocations {
        locations,
        averages,
    }
}

/// Average rating of `park` for each calendar month, across all years.
///
/// Records whose `Year_Month` is not `<year>-<month>` with a month of 1-12,
/// or whose rating is not an integer, are skipped.
pub fn monthly_averages(dataset: &Dataset, park: &str) -> MonthlyAverages {
    let mut result = MonthlyAverages::default();

    let target = normalize(park);
    if target.is_empty() {
        return result;
    }

    let mut buckets = [Bucket::default(); 12];
    for review in dataset {
        if !matches(review.branch(), &target) {
            continue;
        }
        let Some(month) = parse_month(review.year_month()) else {
            continue;
        };
        let Some(rating) = parse_int(review.rating()) else {
            continue;
        };
        buckets[month - 1].add(rating);
    }

    for (avg, bucket) in result.averages.iter_mut().zip(&buckets) {
        *avg = bucket.average().unwrap_or(0.0);
    }

    result
}

/// Extracts the 1-based month from a `YYYY-M` / `YYYY-MM` value.
fn parse_month(year_month: &str) -> Option<usize> {
    let (_, month) = year_month.trim().split_once('-')?;
    if month.contains('-') {
        return None;
    }
    let month = parse_int(month)?;
    (1..=12).contains(&month).then_some(month as usize)
}

/// Average rating per reviewer location for every branch in the dataset.
pub fn park_location_averages(dataset: &Dataset) -> ParkLocationAverages {
    let mut stats: IndexMap<&str, IndexMap<&str, Bucket>> = IndexMap::new();
    for review in dataset {
        let locations = stats.entry(review.group_key(BRANCH)).or_default();
        let Some(rating) = parse_int(review.rating()) else {
            continue;
        };
        locations
            .entry(review.group_key(REVIEWER_LOCATION))
            .or_default()
            .add(rating);
    }

    stats
        .into_iter()
        .map(|(park, locations)| {
            let averages: IndexMap<String, f64> = locations
                .into_iter()
                .filter_map(|(location, bucket)| {
                    bucket.average().map(|avg| (location.to_string(), avg))
                })
                .collect();
            (park.to_string(), averages)
        })
        .collect()
}

/// Average rating per raw branch name. Branches without an integer rating
/// are omitted.
pub fn average_rating_per_park(dataset: &Dataset) -> IndexMap<String, f64> {
    let mut buckets: IndexMap<&str, Bucket> = IndexMap::new();
    for review in dataset {
        if let Some(rating) = parse_int(review.rating()) {
            buckets
                .entry(review.group_key(BRANCH))
                .or_default()
                .add(rating);
        }
    }

    buckets
        .into_iter()
        .filter_map(|(park, bucket)| bucket.average().map(|avg| (park.to_string(), avg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::MONTH_NAMES;
    use crate::dataset::Record;

    fn review(branch: &str, location: &str, rating: &str, year_month: &str) -> Record {
        Record::from_pairs([
            ("Rating", rating),
            ("Year_Month", year_month),
            ("Reviewer_Location", location),
            ("Branch", branch),
        ])
    }

    fn two_reviews() -> Dataset {
        Dataset::new(vec![
            review("Disneyland_California", "UK", "4", "2019-5"),
            review("Disneyland_California", "US", "2", "2019-5"),
        ])
    }

    #[test]
    fn test_count_per_park_sums_to_dataset_size() {
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "France", "3", "2019-1"),
            review("Disneyland_HongKong", "China", "bad", "2019-1"),
            review("Disneyland_Paris", "Spain", "5", "2019-2"),
            Record::from_pairs([("Rating", "4")]),
        ]);

        let counts = count_per_park(&dataset);
        assert_eq!(counts.values().sum::<usize>(), dataset.len());

        let keys: Vec<_> = counts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Disneyland_Paris", "Disneyland_HongKong", "Unknown"]);
        assert_eq!(counts["Disneyland_Paris"], 2);
        // unparseable rating still counts
        assert_eq!(counts["Disneyland_HongKong"], 1);
    }

    #[test]
    fn test_count_per_park_keeps_raw_names() {
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "France", "3", "2019-1"),
            review("disneyland_paris", "France", "3", "2019-1"),
        ]);
        assert_eq!(count_per_park(&dataset).len(), 2);
    }

    #[test]
    fn test_top_locations_example() {
        let top = top_locations_by_rating(&two_reviews(), "california", DEFAULT_TOP_N);
        assert_eq!(top.locations, ["UK", "US"]);
        assert_eq!(top.averages, [4.0, 2.0]);
    }

    #[test]
    fn test_top_locations_ties_keep_encounter_order() {
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "Spain", "3", "2019-1"),
            review("Disneyland_Paris", "Belgium", "5", "2019-1"),
            review("Disneyland_Paris", "Andorra", "3", "2019-1"),
            review("Disneyland_Paris", "Italy", "4", "2019-1"),
            review("Disneyland_Paris", "Italy", "2", "2019-1"),
        ]);

        let top = top_locations_by_rating(&dataset, "paris", DEFAULT_TOP_N);
        assert_eq!(top.locations, ["Belgium", "Spain", "Andorra", "Italy"]);
        assert_eq!(top.averages, [5.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_top_locations_truncates_and_is_non_increasing() {
        let dataset: Dataset = (0..15)
            .map(|i| {
                let location = format!("Location {i}");
                let rating = (i % 5 + 1).to_string();
                review("Disneyland_HongKong", &location, &rating, "2019-3")
            })
            .collect();

        let top = top_locations_by_rating(&dataset, "hongkong", 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top.averages.len(), top.locations.len());
        assert!(top.averages.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(top.locations[0], "Location 4");
    }

    #[test]
    fn test_top_locations_skips_bad_ratings_and_defaults_location() {
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "France", "4.5", "2019-1"),
            Record::from_pairs([("Branch", "Disneyland_Paris"), ("Rating", "2")]),
        ]);

        let top = top_locations_by_rating(&dataset, "paris", DEFAULT_TOP_N);
        assert_eq!(top.locations, ["Unknown"]);
        assert_eq!(top.averages, [2.0]);
    }

    #[test]
    fn test_top_locations_blank_park() {
        assert!(top_locations_by_rating(&two_reviews(), " ", DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_monthly_averages_example() {
        let monthly = monthly_averages(&two_reviews(), "california");

        assert_eq!(monthly.months, MONTH_NAMES);
        assert_eq!(monthly.averages[4], 3.0);
        let others = monthly
            .averages
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 4)
            .all(|(_, avg)| *avg == 0.0);
        assert!(others);
    }

    #[test]
    fn test_monthly_averages_no_match_is_all_zero() {
        let monthly = monthly_averages(&two_reviews(), "paris");
        assert_eq!(monthly.months.len(), 12);
        assert_eq!(monthly.averages, [0.0; 12]);
        assert!(!monthly.has_data());

        assert_eq!(monthly_averages(&two_reviews(), ""), MonthlyAverages::default());
    }

    #[test]
    fn test_monthly_averages_skips_malformed_year_month() {
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "France", "5", "2019-13"),
            review("Disneyland_Paris", "France", "5", "2019-0"),
            review("Disneyland_Paris", "France", "5", "2019-05-01"),
            review("Disneyland_Paris", "France", "5", "missing"),
            review("Disneyland_Paris", "France", "5", "2019-x"),
            review("Disneyland_Paris", "France", "x", "2019-2"),
            review("Disneyland_Paris", "France", "1", "2019-12"),
            review("Disneyland_Paris", "France", "2", " 2018-02 "),
        ]);

        let monthly = monthly_averages(&dataset, "paris");
        assert_eq!(monthly.averages[1], 2.0);
        assert_eq!(monthly.averages[11], 1.0);
        assert_eq!(monthly.averages.iter().filter(|a| **a != 0.0).count(), 2);
    }

    #[test]
    fn test_park_location_averages() {
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "France", "4", "2019-1"),
            review("Disneyland_HongKong", "China", "3", "2019-1"),
            review("Disneyland_Paris", "France", "2", "2019-1"),
            review("Disneyland_Paris", "Spain", "oops", "2019-1"),
            review("Disneyland_California", "US", "", "2019-1"),
        ]);

        let result = park_location_averages(&dataset);
        let parks: Vec<_> = result.keys().map(String::as_str).collect();
        assert_eq!(
            parks,
            ["Disneyland_Paris", "Disneyland_HongKong", "Disneyland_California"]
        );

        assert_eq!(result["Disneyland_Paris"].len(), 1);
        assert_eq!(result["Disneyland_Paris"]["France"], 3.0);
        assert_eq!(result["Disneyland_HongKong"]["China"], 3.0);
        assert!(result["Disneyland_California"].is_empty());
    }

    #[test]
    fn test_park_location_averages_huge_ratings() {
        let max = i64::MAX.to_string();
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "UK", &max, "2019-1"),
            review("Disneyland_Paris", "UK", &max, "2019-1"),
        ]);

        let result = park_location_averages(&dataset);
        assert_eq!(result["Disneyland_Paris"]["UK"], i64::MAX as f64);
    }

    #[test]
    fn test_average_rating_per_park() {
        let dataset = Dataset::new(vec![
            review("Disneyland_Paris", "France", "4", "2019-1"),
            review("Disneyland_Paris", "Spain", "1", "2019-1"),
            review("Disneyland_HongKong", "China", "?", "2019-1"),
        ]);

        let averages = average_rating_per_park(&dataset);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages["Disneyland_Paris"], 2.5);
    }
}
