use crate::themes::Theme;
use dashboard_core::formatting::{format_count, format_share};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a bar.
pub struct BarConfig {
    /// Total width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
    /// Whether to append `count (share)` after the bar.
    pub show_label: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
            show_label: true,
        }
    }
}

/// Number of filled cells for `count` scaled against `max` over `width`.
///
/// A non-zero count always gets at least one cell so small buckets stay
/// visible next to large ones.
pub fn filled_cells(count: u64, max: u64, width: u16) -> u16 {
    if max == 0 || count == 0 {
        return 0;
    }
    let cells = ((count as f64 / max as f64) * width as f64).round() as u16;
    cells.clamp(1, width)
}

// ── CountBar ─────────────────────────────────────────────────────────────────

/// Horizontal bar for one bucket of a summary table.
///
/// The fill is scaled against the largest bucket so the top row spans the
/// full width; the label shows the count and its share of `total`.
pub struct CountBar<'a> {
    pub count: u64,
    /// Largest count in the table; sets the bar scale.
    pub max: u64,
    /// Sum of the table; sets the share in the label.
    pub total: u64,
    pub fill_style: Style,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> CountBar<'a> {
    pub fn new(count: u64, max: u64, total: u64, theme: &'a Theme) -> Self {
        Self {
            count,
            max,
            total,
            fill_style: theme.bar_default,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.fill_style = style;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    pub fn without_label(mut self) -> Self {
        self.config.show_label = false;
        self
    }

    /// Render the bar as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let filled = filled_cells(self.count, self.max, self.config.width);
        let empty = self.config.width.saturating_sub(filled);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        let mut spans = vec![
            Span::styled(filled_str, self.fill_style),
            Span::styled(empty_str, self.theme.bar_empty),
        ];
        if self.config.show_label {
            spans.push(Span::styled(
                format!(
                    " {} ({})",
                    format_count(self.count),
                    format_share(self.count, self.total)
                ),
                self.theme.label,
            ));
        }
        Line::from(spans)
    }
}

// ── TypeSplitBar ─────────────────────────────────────────────────────────────

/// Proportional multi-coloured bar showing the content-type split.
///
/// Each type is a contiguous segment whose width matches its share of the
/// total; short `label: share` captions follow the bar.
pub struct TypeSplitBar<'a> {
    /// Ordered `(type label, count)` pairs.
    pub segments: Vec<(String, u64)>,
    pub theme: &'a Theme,
    pub width: u16,
}

impl<'a> TypeSplitBar<'a> {
    pub fn new(segments: Vec<(String, u64)>, theme: &'a Theme) -> Self {
        Self {
            segments,
            theme,
            width: 50,
        }
    }

    /// Render the bar as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let total: u64 = self.segments.iter().map(|(_, c)| c).sum();
        let mut spans: Vec<Span<'a>> = Vec::new();

        if total == 0 {
            spans.push(Span::styled(
                "\u{2591}".repeat(self.width as usize),
                self.theme.bar_empty,
            ));
            return Line::from(spans);
        }

        for (label, count) in &self.segments {
            let chars = ((*count as f64 / total as f64) * self.width as f64).round() as usize;
            if chars > 0 {
                spans.push(Span::styled("█".repeat(chars), self.theme.type_style(label)));
            }
        }

        spans.push(Span::raw(" "));

        for (label, count) in &self.segments {
            if *count > 0 {
                spans.push(Span::styled(
                    format!("{}: {} ", label, format_share(*count, total)),
                    self.theme.type_style(label),
                ));
            }
        }

        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
