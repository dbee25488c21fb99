use crate::themes::Theme;
use dashboard_core::formatting::format_count;
use dashboard_data::aggregator::Overview;
use dashboard_data::analysis::LoadDiagnostics;
use ratatui::text::{Line, Span};

// ── KpiIndicator ─────────────────────────────────────────────────────────────

/// The headline numbers in one line:
/// `"Titles: 8,807  Movies: 6,131  TV Shows: 2,676  Countries: 122"`.
pub struct KpiIndicator<'a> {
    pub overview: &'a Overview,
    pub theme: &'a Theme,
}

impl<'a> KpiIndicator<'a> {
    pub fn new(overview: &'a Overview, theme: &'a Theme) -> Self {
        Self { overview, theme }
    }

    /// `(label, value)` pairs in display order.
    pub fn items(&self) -> [(&'static str, u64); 4] {
        [
            ("Titles", self.overview.total_titles),
            ("Movies", self.overview.movies),
            ("TV Shows", self.overview.tv_shows),
            ("Countries", self.overview.countries),
        ]
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for (i, (label, value)) in self.items().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("{}: ", label), self.theme.label));
            spans.push(Span::styled(format_count(value), self.theme.value));
        }
        Line::from(spans)
    }
}

// ── DroppedRowsNotice ────────────────────────────────────────────────────────

/// Warning line shown whenever the loader skipped rows.
pub struct DroppedRowsNotice<'a> {
    pub diagnostics: &'a LoadDiagnostics,
    pub theme: &'a Theme,
}

impl<'a> DroppedRowsNotice<'a> {
    pub fn new(diagnostics: &'a LoadDiagnostics, theme: &'a Theme) -> Self {
        Self { diagnostics, theme }
    }

    /// `None` when nothing was dropped.
    pub fn to_line(&self) -> Option<Line<'a>> {
        let message = self.diagnostics.dropped_message()?;
        Some(Line::from(vec![
            Span::styled("⚠ ", self.theme.warning),
            Span::styled(message, self.theme.warning),
        ]))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
