/// Trims and lower-cases `text` for case-insensitive substring matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True when the normalized `haystack` contains `needle`.
///
/// `needle` must already be normalized.
pub fn matches(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(needle)
}

/// Parses an integer field, ignoring surrounding whitespace.
///
/// Float-formatted values such as `"4.0"` are rejected.
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Running sum and count for one group.
///
/// The sum is widened to `i128` so any number of `i64` ratings fits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bucket {
    pub sum: i128,
    pub count: usize,
}

impl Bucket {
    pub fn add(&mut self, value: i64) {
        self.sum += i128::from(value);
        self.count += 1;
    }

    /// Returns `sum / count`, or `None` for an empty bucket.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}
