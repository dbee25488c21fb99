//! Per-session data manager.
//!
//! Owns one loaded dataset and one active [`TitleFilter`], and caches the
//! last [`DashboardSummary`]. Changing the filter invalidates the cache; the
//! next call to [`DataManager::summary`] re-aggregates from the in-memory
//! dataset without touching the file again. [`DataManager::reload`] re-reads
//! the CSV and falls back to the previous dataset when that fails.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use dashboard_core::error::Result;
use dashboard_data::analysis::{summarize_dataset, DashboardSummary};
use dashboard_data::filter::{known_types, year_bounds, TitleFilter};
use dashboard_data::reader::{load_titles, LoadOptions, LoadedDataset};

// ── DataManager ───────────────────────────────────────────────────────────────

/// Session state: dataset, filter, cached summary.
///
/// # Example
/// ```no_run
/// use dashboard_data::filter::TitleFilter;
/// use dashboard_data::reader::LoadOptions;
/// use dashboard_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new("netflix_titles.csv", LoadOptions::default(), TitleFilter::all());
/// mgr.load().unwrap();
/// if let Some(summary) = mgr.summary() {
///     println!("titles: {}", summary.overview.total_titles);
/// }
/// ```
pub struct DataManager {
    /// CSV file backing this session.
    data_path: PathBuf,
    options: LoadOptions,
    /// Filter applied before every aggregation.
    filter: TitleFilter,
    /// Clean dataset, loaded once per session.
    dataset: Option<LoadedDataset>,
    /// Summary for the current `(dataset, filter)` pair.
    cache: Option<DashboardSummary>,
    /// When the cache was last populated.
    cache_timestamp: Option<Instant>,
    /// Human-readable description of the last load error encountered.
    last_error: Option<String>,
    /// Wall-clock seconds the last successful load took.
    last_load_seconds: f64,
}

impl DataManager {
    pub fn new(data_path: impl Into<PathBuf>, options: LoadOptions, filter: TitleFilter) -> Self {
        Self {
            data_path: data_path.into(),
            options,
            filter,
            dataset: None,
            cache: None,
            cache_timestamp: None,
            last_error: None,
            last_load_seconds: 0.0,
        }
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Load the dataset if it is not in memory yet.
    pub fn load(&mut self) -> Result<()> {
        if self.dataset.is_some() {
            return Ok(());
        }
        self.read_file()
    }

    /// Re-read the CSV from disk.
    ///
    /// On failure the previous dataset (if any) stays in place and the error
    /// is both recorded in [`last_error`](Self::last_error) and returned.
    pub fn reload(&mut self) -> Result<()> {
        tracing::info!(path = %self.data_path.display(), "reloading dataset");
        self.read_file()
    }

    // ── Filter ────────────────────────────────────────────────────────────

    pub fn filter(&self) -> &TitleFilter {
        &self.filter
    }

    /// Replace the active filter. The cache is dropped only when the filter
    /// actually changes.
    pub fn set_filter(&mut self, filter: TitleFilter) {
        if filter != self.filter {
            tracing::debug!(?filter, "filter changed");
            self.filter = filter;
            self.invalidate_cache();
        }
    }

    /// Edit the active filter in place.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut TitleFilter)) {
        let mut filter = self.filter.clone();
        edit(&mut filter);
        self.set_filter(filter);
    }

    pub fn reset_filter(&mut self) {
        self.set_filter(TitleFilter::all());
    }

    // ── Summary ───────────────────────────────────────────────────────────

    /// Summary for the current filter, aggregating only on a cache miss.
    ///
    /// Loads the dataset first if nothing has been attempted yet. After a
    /// failed load this returns `None` without touching the file again;
    /// only [`reload`](Self::reload) goes back to disk.
    pub fn summary(&mut self) -> Option<&DashboardSummary> {
        if self.cache.is_some() {
            return self.cache.as_ref();
        }

        if self.dataset.is_none() {
            if self.last_error.is_some() {
                return None;
            }
            if let Err(e) = self.load() {
                tracing::warn!(error = %e, "no dataset available");
                return None;
            }
        }

        let dataset = self.dataset.as_ref()?;
        let mut summary = summarize_dataset(dataset, &self.filter);
        summary.metadata.load_time_seconds = self.last_load_seconds;

        tracing::debug!(
            titles = summary.overview.total_titles,
            "summary cache updated"
        );
        self.cache = Some(summary);
        self.cache_timestamp = Some(Instant::now());
        self.cache.as_ref()
    }

    /// The cached summary without re-aggregating; `None` on a cache miss.
    pub fn cached_summary(&self) -> Option<&DashboardSummary> {
        self.cache.as_ref()
    }

    /// Discard the cached summary, forcing the next [`summary`](Self::summary)
    /// call to re-aggregate.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        self.cache_timestamp = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the cached summary, or `None` if nothing is cached.
    pub fn cache_age(&self) -> Option<Duration> {
        self.cache_timestamp.map(|ts| ts.elapsed())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        self.dataset.as_ref()
    }

    /// Content-type labels present in the unfiltered dataset.
    pub fn known_types(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|d| known_types(&d.records))
            .unwrap_or_default()
    }

    /// Year-added bounds of the unfiltered dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.dataset.as_ref().and_then(|d| year_bounds(&d.records))
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn read_file(&mut self) -> Result<()> {
        let start = Instant::now();
        match load_titles(&self.data_path, &self.options) {
            Ok(dataset) => {
                self.last_load_seconds = start.elapsed().as_secs_f64();
                self.dataset = Some(dataset);
                self.last_error = None;
                self.invalidate_cache();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed; keeping previous dataset");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
