//! Filtering and scalar queries over a [`Dataset`].
//!
//! Park and location queries are matched as case-insensitive substrings of
//! the record's field. A blank query never matches anything.

use crate::analyzers::utility::{Bucket, matches, normalize, parse_int};
use crate::dataset::Dataset;

/// Returns the records whose branch contains `park`, in source order.
pub fn filter_by_park(dataset: &Dataset, park: &str) -> Dataset {
    let target = normalize(park);
    if target.is_empty() {
        return Dataset::default();
    }

    dataset
        .iter()
        .filter(|r| matches(r.branch(), &target))
        .cloned()
        .collect()
}

/// Counts reviews of `park` written from `location`.
pub fn count_by_park_and_location(dataset: &Dataset, park: &str, location: &str) -> usize {
    let target_park = normalize(park);
    let target_location = normalize(location);
    if target_park.is_empty() || target_location.is_empty() {
        return 0;
    }

    dataset
        .iter()
        .filter(|r| {
            matches(r.branch(), &target_park) && matches(r.reviewer_location(), &target_location)
        })
        .count()
}

/// Average rating of `park` for reviews dated in `year`.
///
/// `year` must be four ASCII digits. Returns `None` for an invalid query or
/// when no review with an integer rating qualifies.
pub fn average_rating_by_year(dataset: &Dataset, park: &str, year: &str) -> Option<f64> {
    let target_park = normalize(park);
    let target_year = year.trim();
    if target_park.is_empty() || !is_year(target_year) {
        return None;
    }

    let mut bucket = Bucket::default();
    for review in dataset {
        if !matches(review.branch(), &target_park)
            || !review.year_month().trim().starts_with(target_year)
        {
            continue;
        }
        if let Some(rating) = parse_int(review.rating()) {
            bucket.add(rating);
        }
    }

    bucket.average()
}

fn is_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}
