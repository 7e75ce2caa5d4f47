use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::cache;
use crate::data::export::export_pivot;
use crate::data::filter::{GenreFilter, YearRange};
use crate::data::model::GenreDataset;
use crate::data::pivot::{aggregate, melt, LongRow, PivotTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// File the current dataset came from.
    pub source_path: Option<PathBuf>,

    /// Loaded dataset, shared with the process-wide cache.
    pub dataset: Option<Arc<GenreDataset>>,

    /// Set when the initial load failed; nothing else is rendered then.
    pub startup_error: Option<String>,

    /// Genre multi-select.
    pub selected_genres: BTreeSet<String>,

    /// Year slider selection.
    pub years: YearRange,

    /// Slider bounds (`None` for a dataset without rows).
    pub year_bounds: Option<YearRange>,

    /// Derived views, rebuilt by [`AppState::refresh`].
    pub table: PivotTable,
    pub long_form: Vec<LongRow>,

    pub color_map: ColorMap,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let years = config
            .default_years
            .unwrap_or_else(|| YearRange::new(0, -1));
        Self {
            config,
            source_path: None,
            dataset: None,
            startup_error: None,
            selected_genres: BTreeSet::new(),
            years,
            year_bounds: None,
            table: PivotTable::default(),
            long_form: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Load the configured data file.  A failure here is fatal for the session.
    pub fn load_initial(&mut self) {
        let path = self.config.data_path.clone();
        match cache::load_cached(&path) {
            Ok(dataset) => self.set_dataset(path, dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.startup_error = Some(format!("{e:#}"));
            }
        }
    }

    /// Load another file chosen by the user.  On failure the current
    /// dataset stays and the error goes to the status line.
    pub fn open(&mut self, path: &Path) {
        match cache::load_cached(path) {
            Ok(dataset) => self.set_dataset(path.to_path_buf(), dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Drop the cached copy of the current file and read it again.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            cache::invalidate(&path);
            self.open(&path);
        }
    }

    /// Ingest a newly loaded dataset, initialise widgets and colours.
    pub fn set_dataset(&mut self, path: PathBuf, dataset: Arc<GenreDataset>) {
        self.selected_genres = self
            .config
            .default_genres
            .iter()
            .filter(|g| dataset.genres().contains(g))
            .cloned()
            .collect();

        self.year_bounds = self
            .config
            .year_bounds
            .or_else(|| dataset.year_bounds().map(YearRange::from));
        if let Some(bounds) = self.year_bounds {
            self.years = default_window(self.config.default_years, bounds);
        }

        self.color_map = ColorMap::new(dataset.genres());
        self.dataset = Some(dataset);
        self.source_path = Some(path);
        self.startup_error = None;
        self.status_message = None;
        self.refresh();
    }

    pub fn filter(&self) -> GenreFilter {
        GenreFilter::new(self.selected_genres.iter().cloned(), self.years)
    }

    /// Re-run filter → pivot → melt after a widget change.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let filter = self.filter();
        self.table = aggregate(ds, &filter);
        self.long_form = melt(&self.table);
        log::debug!(
            "Filtered {} genres over {}: {} years x {} genres",
            filter.genres.len(),
            filter.years,
            self.table.years().len(),
            self.table.genres().len()
        );
    }

    /// Toggle a single genre in the multi-select.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selected_genres.remove(genre) {
            self.selected_genres.insert(genre.to_string());
        }
        self.refresh();
    }

    /// Select every genre of the dataset.
    pub fn select_all_genres(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected_genres = ds.genres().iter().cloned().collect();
            self.refresh();
        }
    }

    /// Deselect all genres.
    pub fn select_no_genres(&mut self) {
        self.selected_genres.clear();
        self.refresh();
    }

    /// Move the year window, keeping it inside the slider bounds.
    pub fn set_years(&mut self, years: YearRange) {
        let years = match self.year_bounds {
            Some(bounds) => years.clamp_to(bounds),
            None => years,
        };
        if years != self.years {
            self.years = years;
            self.refresh();
        }
    }

    /// Write the current table to `path`, reporting the outcome in the status line.
    pub fn export_table(&mut self, path: &Path) {
        match export_pivot(&self.table, path) {
            Ok(()) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Initial slider window: the configured default clamped into `bounds`,
/// or the whole bounded range when the two do not overlap.
pub fn default_window(default: Option<YearRange>, bounds: YearRange) -> YearRange {
    match default.map(|d| d.clamp_to(bounds)) {
        Some(window) if !window.is_empty() => window,
        _ => bounds,
    }
}
