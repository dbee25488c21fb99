//! Top-level pipeline: load, filter, summarise.
//!
//! Returns a [`DashboardSummary`] holding every table the presentation layer
//! draws, so views never touch raw records.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use dashboard_core::error::{ParseWarning, Result};
use dashboard_core::models::{TitleRecord, TrendKey, YearMonth};
use serde::Serialize;

use crate::aggregator::{
    MinuteBin, Overview, SummaryTable, TitleAggregator, DEFAULT_HISTOGRAM_BINS,
};
use crate::filter::TitleFilter;
use crate::reader::{load_titles, LoadOptions, LoadedDataset};

// ── Public types ──────────────────────────────────────────────────────────────

/// Counts from the loader, surfaced next to the charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadDiagnostics {
    pub rows_read: u64,
    pub dropped_rows: u64,
    pub duplicates_removed: u64,
    /// Records left after cleaning.
    pub clean_rows: u64,
    /// Records left after the active filter.
    pub filtered_rows: u64,
    pub warnings: Vec<ParseWarning>,
}

impl LoadDiagnostics {
    pub fn from_dataset(dataset: &LoadedDataset, filtered_rows: usize) -> Self {
        Self {
            rows_read: dataset.rows_read,
            dropped_rows: dataset.dropped_rows,
            duplicates_removed: dataset.duplicates_removed,
            clean_rows: dataset.records.len() as u64,
            filtered_rows: filtered_rows as u64,
            warnings: dataset.warnings.clone(),
        }
    }

    /// Message for the dropped-row banner, `None` when nothing was dropped.
    pub fn dropped_message(&self) -> Option<String> {
        if self.dropped_rows == 0 {
            return None;
        }
        Some(format!(
            "{} of {} rows dropped (missing or invalid date added / release year)",
            self.dropped_rows, self.rows_read
        ))
    }
}

/// Metadata produced alongside the summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this summary was generated.
    pub generated_at: String,
    /// Wall-clock seconds spent loading and cleaning the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent filtering and aggregating.
    pub aggregate_time_seconds: f64,
}

/// Every table the dashboard renders, computed from one filtered dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub overview: Overview,
    pub content_trend: SummaryTable<TrendKey>,
    pub by_type: SummaryTable<String>,
    pub by_country: SummaryTable<String>,
    pub by_genre: SummaryTable<String>,
    pub by_rating: SummaryTable<String>,
    pub by_month: SummaryTable<YearMonth>,
    pub runtime_histogram: SummaryTable<MinuteBin>,
    pub season_counts: SummaryTable<u32>,
    pub diagnostics: LoadDiagnostics,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Build every summary table over `records`.
///
/// Diagnostics are left at their defaults; see [`summarize_dataset`] for the
/// variant that fills them in.
pub fn summarize(records: &[TitleRecord]) -> DashboardSummary {
    let start = Instant::now();

    let mut summary = DashboardSummary {
        overview: TitleAggregator::overview(records),
        content_trend: TitleAggregator::content_trend(records),
        by_type: TitleAggregator::by_type(records),
        by_country: TitleAggregator::by_country(records),
        by_genre: TitleAggregator::by_genre(records),
        by_rating: TitleAggregator::by_rating(records),
        by_month: TitleAggregator::by_month(records),
        runtime_histogram: TitleAggregator::movie_runtime_histogram(
            records,
            DEFAULT_HISTOGRAM_BINS,
        ),
        season_counts: TitleAggregator::season_counts(records),
        diagnostics: LoadDiagnostics::default(),
        metadata: AnalysisMetadata::default(),
    };

    summary.metadata.generated_at = Utc::now().to_rfc3339();
    summary.metadata.aggregate_time_seconds = start.elapsed().as_secs_f64();
    summary
}

/// Filter an already-loaded dataset and summarise the result.
pub fn summarize_dataset(dataset: &LoadedDataset, filter: &TitleFilter) -> DashboardSummary {
    let start = Instant::now();
    let filtered = filter.apply(&dataset.records);

    let mut summary = summarize(&filtered);
    summary.diagnostics = LoadDiagnostics::from_dataset(dataset, filtered.len());
    summary.metadata.aggregate_time_seconds = start.elapsed().as_secs_f64();

    tracing::debug!(
        clean = dataset.records.len(),
        filtered = filtered.len(),
        "Summarised dataset"
    );
    summary
}

/// Run the full pipeline on the CSV at `path`.
///
/// 1. Load and clean the file.
/// 2. Apply `filter`.
/// 3. Build every summary table and attach diagnostics.
pub fn analyze_dataset(
    path: &Path,
    options: &LoadOptions,
    filter: &TitleFilter,
) -> Result<DashboardSummary> {
    let load_start = Instant::now();
    let dataset = load_titles(path, options)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let mut summary = summarize_dataset(&dataset, filter);
    summary.metadata.load_time_seconds = load_time;
    Ok(summary)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
