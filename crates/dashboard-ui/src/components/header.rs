use crate::themes::Theme;
use dashboard_data::filter::TitleFilter;
use ratatui::text::{Line, Span};

/// Marker drawn in front of the application title.
pub const MARKER: &str = "▌";

/// Dashboard header rendering four lines:
///
/// 1. Application title.
/// 2. A 60-column `=` separator.
/// 3. Source file and active filter in `[ file | filter ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Display name of the CSV file (usually just the file name).
    pub source: &'a str,
    pub filter: &'a TitleFilter,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, filter: &'a TitleFilter, theme: &'a Theme) -> Self {
        Self {
            source,
            filter,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(MARKER, self.theme.accent),
                Span::styled(" NETFLIX CATALOGUE DASHBOARD", self.theme.header),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(describe_filter(self.filter), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

/// One-line summary of the active filter, e.g.
/// `"years 2015-2020, Movie, all countries"`.
pub fn describe_filter(filter: &TitleFilter) -> String {
    let years = match filter.year_added {
        None => "all years".to_string(),
        Some((from, to)) if from == to => format!("year {}", from),
        Some((i32::MIN, to)) => format!("years ..{}", to),
        Some((from, i32::MAX)) => format!("years {}..", from),
        Some((from, to)) => format!("years {}-{}", from, to),
    };

    let types = if filter.types.is_empty() {
        "all types".to_string()
    } else {
        filter.types.iter().cloned().collect::<Vec<_>>().join(" + ")
    };

    let countries = match filter.countries.len() {
        0 => "all countries".to_string(),
        1 | 2 => filter.countries.iter().cloned().collect::<Vec<_>>().join(" + "),
        n => format!("{} countries", n),
    };

    format!("{}, {}, {}", years, types, countries)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
