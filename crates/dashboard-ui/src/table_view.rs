//! Count-table views for the dashboard TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per bucket of
//! a summary table (label, count, share, bar) plus a highlighted totals row.

use std::fmt::Display;

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dashboard_core::formatting::{format_count, format_share};
use dashboard_data::aggregator::SummaryTable;

use crate::components::progress_bar::CountBar;
use crate::themes::Theme;

const LABEL_WIDTH: u16 = 28;
const COUNT_WIDTH: u16 = 9;
const SHARE_WIDTH: u16 = 8;

/// Data for a single row in a count table.
#[derive(Debug, Clone, PartialEq)]
pub struct CountRow {
    pub label: String,
    pub count: u64,
    /// Bar fill override; `None` uses the theme's default bar style.
    pub fill: Option<Style>,
}

impl CountRow {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
            fill: None,
        }
    }
}

/// Convert a summary table into display rows, keeping its order.
pub fn rows_from_table<K: Display>(table: &SummaryTable<K>) -> Vec<CountRow> {
    table
        .iter()
        .map(|row| CountRow::new(row.key.to_string(), row.count))
        .collect()
}

/// Shorten `text` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Render a count table into `area`.
///
/// `total` is the denominator for the share column; pass the full table's
/// total when `rows` is a top-N slice so shares stay relative to everything.
pub fn render_count_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    key_header: &str,
    rows: &[CountRow],
    total: u64,
    theme: &Theme,
) {
    let header = Row::new(
        [key_header, "Titles", "Share", ""]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    // Borders (2) plus three column gaps.
    let bar_width = area
        .width
        .saturating_sub(2 + LABEL_WIDTH + COUNT_WIDTH + SHARE_WIDTH + 3)
        .max(1);

    let mut table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let bar = CountBar::new(row.count, max, total, theme)
                .with_style(row.fill.unwrap_or(theme.bar_default))
                .with_width(bar_width)
                .without_label()
                .to_line();
            Row::new(vec![
                Cell::from(truncate_to_width(&row.label, LABEL_WIDTH as usize)),
                Cell::from(format_count(row.count)),
                Cell::from(format_share(row.count, total)),
                Cell::from(bar),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let shown: u64 = rows.iter().map(|r| r.count).sum();
    table_rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(format_count(shown)),
            Cell::from(format_share(shown, total)),
            Cell::from(""),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(LABEL_WIDTH),
        Constraint::Length(COUNT_WIDTH),
        Constraint::Length(SHARE_WIDTH),
        Constraint::Min(bar_width),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when a table has no rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No titles match the current filter", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'r' to reset the filter, 'q' or Ctrl+C to exit",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
