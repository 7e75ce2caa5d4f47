use std::path::PathBuf;

use crate::data::filter::YearRange;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

pub const ENV_DATA_PATH: &str = "MOVIE_GENRES_DATA";
pub const ENV_DEFAULT_GENRES: &str = "MOVIE_GENRES_DEFAULT_GENRES";
pub const ENV_DEFAULT_YEARS: &str = "MOVIE_GENRES_DEFAULT_YEARS";
pub const ENV_YEAR_BOUNDS: &str = "MOVIE_GENRES_YEAR_BOUNDS";

/// Startup settings: where the data lives and the initial widget values.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Preselected genres; names absent from the data are dropped.
    pub default_genres: Vec<String>,
    /// Initial year window, clamped into the slider bounds.
    pub default_years: Option<YearRange>,
    /// Slider bounds.  `None` derives them from the data.
    pub year_bounds: Option<YearRange>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/movies_genres_summary.csv"),
            default_genres: ["Action", "Adventure", "Comedy", "Drama", "Horror"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_years: Some(YearRange::new(2014, 2016)),
            year_bounds: None,
        }
    }
}

impl DashboardConfig {
    /// Defaults, overridden by environment variables, then by the first
    /// positional command-line argument (the data path).
    pub fn from_env_and_args() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        let mut config = Self::default().with_overrides(lookup);
        if let Some(path) = std::env::args_os().nth(1) {
            config.data_path = PathBuf::from(path);
        }
        config
    }

    /// Apply overrides from a key lookup.  Malformed values are logged and skipped.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|p| !p.trim().is_empty()) {
            self.data_path = PathBuf::from(path.trim());
        }

        if let Some(list) = lookup(ENV_DEFAULT_GENRES) {
            self.default_genres = parse_genre_list(&list);
        }

        if let Some(raw) = lookup(ENV_DEFAULT_YEARS) {
            match parse_year_range(&raw) {
                Some(range) => self.default_years = Some(range),
                None => log::warn!("Ignoring {ENV_DEFAULT_YEARS}={raw:?}: expected e.g. 2014-2016"),
            }
        }

        if let Some(raw) = lookup(ENV_YEAR_BOUNDS) {
            match parse_year_range(&raw) {
                Some(range) if !range.is_empty() => self.year_bounds = Some(range),
                _ => log::warn!("Ignoring {ENV_YEAR_BOUNDS}={raw:?}: expected e.g. 1990-2016"),
            }
        }

        self
    }
}

/// `"Action, Drama,,Horror"` → `["Action", "Drama", "Horror"]`.
pub fn parse_genre_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Accepts `2014-2016`, `2014..2016`, `2014..=2016` or a single year.
pub fn parse_year_range(raw: &str) -> Option<YearRange> {
    let raw = raw.trim();
    let (low, high) = if let Some((a, b)) = raw.split_once("..=") {
        (a, b)
    } else if let Some((a, b)) = raw.split_once("..") {
        (a, b)
    } else if let Some((a, b)) = raw.split_once('-') {
        (a, b)
    } else {
        (raw, raw)
    };
    let low = low.trim().parse().ok()?;
    let high = high.trim().parse().ok()?;
    Some(YearRange::new(low, high))
}
