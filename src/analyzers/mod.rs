//! Review aggregation engine.
//!
//! Every operation is a pure read over an immutable [`Dataset`](crate::dataset::Dataset):
//! filtered views, grouped counts, grouped averages, and the per-park
//! summary handed to the export layer. Invalid queries yield neutral
//! results (`0`, `None`, empty collections) instead of errors.

pub mod aggregate;
pub mod query;
pub mod summary;
pub mod types;
pub mod utility;

pub use aggregate::{
    DEFAULT_TOP_N, average_rating_per_park, count_per_park, monthly_averages,
    park_location_averages, top_locations_by_rating,
};
pub use query::{average_rating_by_year, count_by_park_and_location, filter_by_park};
pub use summary::summarize;
