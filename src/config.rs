use std::path::{Path, PathBuf};

/// Environment variable naming the reviews CSV.
pub const DATA_PATH_ENV: &str = "REVIEWS_CSV";

pub const DEFAULT_DATA_PATH: &str = "data/Disneyland_reviews.csv";

/// Tried when [`DEFAULT_DATA_PATH`] does not exist, for checkouts that
/// store the file in lower case.
pub const FALLBACK_DATA_PATH: &str = "data/disneyland_reviews.csv";

/// Picks the dataset path: explicit argument, then `REVIEWS_CSV`, then the
/// default location.
pub fn data_path(arg: Option<PathBuf>) -> PathBuf {
    resolve_data_path(arg, std::env::var(DATA_PATH_ENV).ok())
}

fn resolve_data_path(arg: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = arg {
        return path;
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return PathBuf::from(value);
    }

    let default = Path::new(DEFAULT_DATA_PATH);
    if !default.exists() && Path::new(FALLBACK_DATA_PATH).exists() {
        return PathBuf::from(FALLBACK_DATA_PATH);
    }
    default.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_wins() {
        let path = resolve_data_path(Some("reviews.csv".into()), Some("env.csv".to_string()));
        assert_eq!(path, PathBuf::from("reviews.csv"));
    }

    #[test]
    fn test_env_used_without_argument() {
        let path = resolve_data_path(None, Some("env.csv".to_string()));
        assert_eq!(path, PathBuf::from("env.csv"));
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        let path = resolve_data_path(None, Some("  ".to_string()));
        // neither default file exists in the crate root during tests
        assert_eq!(path, PathBuf::from(DEFAULT_DATA_PATH));
    }
}
