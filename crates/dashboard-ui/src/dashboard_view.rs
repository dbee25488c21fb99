//! Per-tab views for the dashboard TUI.
//!
//! The overview is a plain [`Paragraph`] of lines built by
//! [`build_overview_lines`]; the chart tabs are tables drawn from the
//! pre-aggregated [`DashboardSummary`].

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dashboard_core::formatting::{format_count, format_runtime};
use dashboard_core::models::{TrendKey, NOT_SPECIFIED};
use dashboard_data::aggregator::SummaryTable;
use dashboard_data::analysis::DashboardSummary;

use crate::components::indicators::{DroppedRowsNotice, KpiIndicator};
use crate::components::progress_bar::{filled_cells, TypeSplitBar};
use crate::table_view::{self, CountRow};
use crate::themes::Theme;

// ── Overview ──────────────────────────────────────────────────────────────────

/// Build the overview lines: KPIs, type split, load diagnostics.
pub fn build_overview_lines<'a>(summary: &'a DashboardSummary, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::with_capacity(16);

    lines.push(KpiIndicator::new(&summary.overview, theme).to_line());
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Content type split", theme.bold)));
    let segments = summary
        .by_type
        .iter()
        .map(|row| (row.key.clone(), row.count))
        .collect();
    lines.push(TypeSplitBar::new(segments, theme).to_line());
    lines.push(Line::from(""));

    if let Some(notice) = DroppedRowsNotice::new(&summary.diagnostics, theme).to_line() {
        lines.push(notice);
        lines.push(Line::from(""));
    }

    let d = &summary.diagnostics;
    lines.push(Line::from(Span::styled("─".repeat(60), theme.separator)));
    for (label, value) in [
        ("Rows read", d.rows_read),
        ("Dropped", d.dropped_rows),
        ("Duplicates removed", d.duplicates_removed),
        ("Clean titles", d.clean_rows),
        ("Matching filter", d.filtered_rows),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<22}", label), theme.label),
            Span::styled(format_count(value), theme.value),
        ]));
    }

    lines
}

/// Render the overview tab into `area`.
pub fn render_overview(frame: &mut Frame, area: Rect, summary: &DashboardSummary, theme: &Theme) {
    let lines = build_overview_lines(summary, theme);
    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(" Overview "),
    );
    frame.render_widget(paragraph, area);
}

// ── Trends ────────────────────────────────────────────────────────────────────

/// One release year of the content-trend table, split by type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendRow {
    pub release_year: i32,
    pub movies: u64,
    pub tv_shows: u64,
    /// Titles whose type is neither Movie nor TV Show.
    pub other: u64,
}

impl TrendRow {
    pub fn total(&self) -> u64 {
        self.movies + self.tv_shows + self.other
    }
}

/// Pivot `(release_year, type)` buckets into one row per year, ascending.
pub fn trend_rows(table: &SummaryTable<TrendKey>) -> Vec<TrendRow> {
    let mut rows: Vec<TrendRow> = Vec::new();
    for bucket in table.iter() {
        let year = bucket.key.release_year;
        if rows.last().map(|r| r.release_year) != Some(year) {
            rows.push(TrendRow {
                release_year: year,
                ..TrendRow::default()
            });
        }
        // The table is ordered by year, so the current year is always last.
        if let Some(row) = rows.last_mut() {
            match bucket.key.content_type.as_str() {
                "Movie" => row.movies += bucket.count,
                "TV Show" => row.tv_shows += bucket.count,
                _ => row.other += bucket.count,
            }
        }
    }
    rows
}

/// Render the release-year trend, most recent years that fit in `area`.
pub fn render_trends(frame: &mut Frame, area: Rect, summary: &DashboardSummary, theme: &Theme) {
    let rows = trend_rows(&summary.content_trend);
    if rows.is_empty() {
        table_view::render_no_data(frame, area, "Content Trend", theme);
        return;
    }

    // Borders, header and one spare line.
    let visible = area.height.saturating_sub(4).max(1) as usize;
    let start = rows.len().saturating_sub(visible);
    let shown = &rows[start..];

    let max = shown.iter().map(TrendRow::total).max().unwrap_or(0);
    let bar_width = area.width.saturating_sub(2 + 6 + 8 + 9 + 7 + 8 + 5).max(1);

    let header = Row::new(
        ["Year", "Movies", "TV Shows", "Other", "Total", ""]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let body: Vec<Row> = shown
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let movie_cells = filled_cells(row.movies, max, bar_width);
            let tv_cells = filled_cells(row.tv_shows, max, bar_width);
            let bar = Line::from(vec![
                Span::styled("█".repeat(movie_cells as usize), theme.bar_movie),
                Span::styled("█".repeat(tv_cells as usize), theme.bar_tv_show),
            ]);
            Row::new(vec![
                Cell::from(row.release_year.to_string()),
                Cell::from(format_count(row.movies)),
                Cell::from(format_count(row.tv_shows)),
                Cell::from(format_count(row.other)),
                Cell::from(format_count(row.total())),
                Cell::from(bar),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Min(bar_width),
    ];

    let title = format!(
        " Titles by release year ({}–{}) ",
        shown[0].release_year,
        shown[shown.len() - 1].release_year
    );
    let table = Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(title),
        )
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Durations ─────────────────────────────────────────────────────────────────

/// Display label for a season count.
pub fn season_label(seasons: u32) -> String {
    if seasons == 1 {
        "1 Season".to_string()
    } else {
        format!("{} Seasons", seasons)
    }
}

/// Render the movie runtime histogram and the TV-season counts side by side.
pub fn render_durations(
    frame: &mut Frame,
    area: Rect,
    summary: &DashboardSummary,
    top: usize,
    theme: &Theme,
) {
    let [left, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .areas(area);

    let histogram = &summary.runtime_histogram;
    let movie_title = "Movie runtimes";
    if histogram.is_empty() {
        table_view::render_no_data(frame, left, movie_title, theme);
    } else {
        let rows: Vec<CountRow> = histogram
            .iter()
            .map(|row| {
                let label = format!(
                    "{}-{}",
                    format_runtime(row.key.lower),
                    format_runtime(row.key.upper)
                );
                CountRow {
                    fill: Some(theme.bar_movie),
                    ..CountRow::new(label, row.count)
                }
            })
            .collect();
        table_view::render_count_table(
            frame,
            left,
            movie_title,
            "Runtime",
            &rows,
            histogram.total(),
            theme,
        );
    }

    let seasons = &summary.season_counts;
    if seasons.is_empty() {
        table_view::render_no_data(frame, right, "TV seasons", theme);
    } else {
        let rows: Vec<CountRow> = seasons
            .top_n(top)
            .iter()
            .map(|row| CountRow {
                fill: Some(theme.bar_tv_show),
                ..CountRow::new(season_label(row.key), row.count)
            })
            .collect();
        table_view::render_count_table(
            frame,
            right,
            "TV seasons",
            "Seasons",
            &rows,
            seasons.total(),
            theme,
        );
    }
}

// ── Timeline ──────────────────────────────────────────────────────────────────

/// Render titles added per month, the most recent months that fit.
pub fn render_timeline(frame: &mut Frame, area: Rect, summary: &DashboardSummary, theme: &Theme) {
    let months = &summary.by_month;
    if months.is_empty() {
        table_view::render_no_data(frame, area, "Titles added per month", theme);
        return;
    }

    // Borders, header and the totals row.
    let visible = area.height.saturating_sub(4).max(1) as usize;
    let start = months.len().saturating_sub(visible);
    let rows = table_view::rows_from_table(months).split_off(start);

    let title = format!(
        "Titles added per month (latest {} of {})",
        rows.len(),
        months.len()
    );
    table_view::render_count_table(frame, area, &title, "Month", &rows, months.total(), theme);
}

// ── Ranked tables ─────────────────────────────────────────────────────────────

/// Rows for a ranked table limited to `top`, with `"Not Specified"` dimmed.
pub fn ranked_rows(table: &SummaryTable<String>, top: usize, theme: &Theme) -> Vec<CountRow> {
    table
        .top_n(top)
        .iter()
        .map(|row| CountRow {
            fill: (row.key == NOT_SPECIFIED).then_some(theme.dim),
            ..CountRow::new(row.key.clone(), row.count)
        })
        .collect()
}

/// Render a ranked string-keyed table, or the placeholder when it is empty.
pub fn render_ranked(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    key_header: &str,
    table: &SummaryTable<String>,
    top: usize,
    theme: &Theme,
) {
    if table.is_empty() {
        table_view::render_no_data(frame, area, title, theme);
        return;
    }
    let rows = ranked_rows(table, top, theme);
    let title = if rows.len() < table.len() {
        format!("{} (top {} of {})", title, rows.len(), table.len())
    } else {
        title.to_string()
    };
    table_view::render_count_table(frame, area, &title, key_header, &rows, table.total(), theme);
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Render a load failure in place of the dashboard.
pub fn render_load_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Could not load the titles dataset", theme.error)),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.text)),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'R' to retry, 'q' or Ctrl+C to exit",
            theme.dim,
        )),
    ];
    let paragraph = Paragraph::new(Text::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.error)
            .title(" Netflix Dashboard "),
    );
    frame.render_widget(paragraph, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
