//! Non-interactive report output.
//!
//! Renders a [`DashboardSummary`] as aligned plain text or as JSON. Both
//! forms are returned as a `String`; printing is left to the caller.

use std::fmt::{Display, Write};

use serde_json::json;
use unicode_width::UnicodeWidthStr;

use dashboard_core::formatting::{format_count, format_share};
use dashboard_data::aggregator::SummaryTable;
use dashboard_data::analysis::DashboardSummary;
use dashboard_data::filter::TitleFilter;

use crate::components::header::describe_filter;
use crate::dashboard_view::{season_label, trend_rows};

const KEY_COLUMN: usize = 28;

/// What the report is about, printed above the tables.
pub struct ReportContext<'a> {
    pub source: &'a str,
    pub filter: &'a TitleFilter,
    /// Row limit for ranked tables.
    pub top: usize,
}

// ── Text ──────────────────────────────────────────────────────────────────────

/// Render every table as aligned text.
pub fn render_text(summary: &DashboardSummary, ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "NETFLIX CATALOGUE REPORT");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Source: {}", ctx.source);
    let _ = writeln!(out, "Filter: {}", describe_filter(ctx.filter));
    let _ = writeln!(out);

    let o = &summary.overview;
    let _ = writeln!(
        out,
        "Titles: {}  Movies: {}  TV Shows: {}  Countries: {}",
        format_count(o.total_titles),
        format_count(o.movies),
        format_count(o.tv_shows),
        format_count(o.countries)
    );
    if let Some(message) = summary.diagnostics.dropped_message() {
        let _ = writeln!(out, "Warning: {}", message);
    }
    if summary.diagnostics.duplicates_removed > 0 {
        let _ = writeln!(
            out,
            "Duplicates removed: {}",
            format_count(summary.diagnostics.duplicates_removed)
        );
    }

    write_table(&mut out, "Content type", &summary.by_type, usize::MAX);

    section(&mut out, "Titles by release year");
    let _ = writeln!(
        out,
        "{:<6} {:>8} {:>9} {:>7} {:>8}",
        "Year", "Movies", "TV Shows", "Other", "Total"
    );
    for row in trend_rows(&summary.content_trend) {
        let _ = writeln!(
            out,
            "{:<6} {:>8} {:>9} {:>7} {:>8}",
            row.release_year,
            format_count(row.movies),
            format_count(row.tv_shows),
            format_count(row.other),
            format_count(row.total())
        );
    }

    write_table(&mut out, "Top countries", &summary.by_country, ctx.top);
    write_table(&mut out, "Ratings", &summary.by_rating, usize::MAX);
    write_table(&mut out, "Top genres", &summary.by_genre, ctx.top);
    write_table(&mut out, "Movie runtimes (minutes)", &summary.runtime_histogram, usize::MAX);

    section(&mut out, "TV seasons");
    let seasons = &summary.season_counts;
    for row in seasons.top_n(ctx.top).iter() {
        write_row(&mut out, &season_label(row.key), row.count, seasons.total());
    }

    write_table(&mut out, "Titles added per month", &summary.by_month, usize::MAX);

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "== {} ==", title);
}

fn write_table<K: Display + Clone>(out: &mut String, title: &str, table: &SummaryTable<K>, top: usize) {
    if top < table.len() {
        section(out, &format!("{} (top {} of {})", title, top, table.len()));
    } else {
        section(out, title);
    }
    if table.is_empty() {
        let _ = writeln!(out, "(no data)");
        return;
    }
    for row in table.top_n(top).iter() {
        write_row(out, &row.key.to_string(), row.count, table.total());
    }
}

fn write_row(out: &mut String, label: &str, count: u64, total: u64) {
    let pad = KEY_COLUMN.saturating_sub(label.width());
    let _ = writeln!(
        out,
        "{}{} {:>9} {:>7}",
        label,
        " ".repeat(pad),
        format_count(count),
        format_share(count, total)
    );
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Render the summary as pretty-printed JSON.
///
/// Ranked tables (countries, genres, seasons) are cut to `ctx.top`; every
/// other table is complete.
pub fn render_json(
    summary: &DashboardSummary,
    ctx: &ReportContext<'_>,
) -> Result<String, serde_json::Error> {
    let value = json!({
        "source": ctx.source,
        "filter": {
            "description": describe_filter(ctx.filter),
            "year_added": ctx.filter.year_added,
            "types": ctx.filter.types,
            "countries": ctx.filter.countries,
        },
        "overview": summary.overview,
        "diagnostics": summary.diagnostics,
        "metadata": summary.metadata,
        "tables": {
            "content_trend": summary.content_trend,
            "by_type": summary.by_type,
            "by_country": summary.by_country.top_n(ctx.top),
            "by_rating": summary.by_rating,
            "by_genre": summary.by_genre.top_n(ctx.top),
            "runtime_histogram": summary.runtime_histogram,
            "season_counts": summary.season_counts.top_n(ctx.top),
            "by_month": summary.by_month,
        },
    });
    serde_json::to_string_pretty(&value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
