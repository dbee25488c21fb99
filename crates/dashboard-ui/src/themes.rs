use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    background_from(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from(colorfgbg: Option<&str>) -> BackgroundType {
    let bg = colorfgbg
        .and_then(|val| val.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok());
    match bg {
        Some(n) if n <= 6 => BackgroundType::Dark,
        Some(_) => BackgroundType::Light,
        None => BackgroundType::Dark,
    }
}

/// Every style the dashboard draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    /// Brand accent used for the title marker and active tab.
    pub accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Bars ─────────────────────────────────────────────────────────────────
    pub bar_movie: Style,
    pub bar_tv_show: Style,
    /// Fill for bars that are not split by content type.
    pub bar_default: Style,
    pub bar_empty: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            accent: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::Gray),

            bar_movie: Style::default().fg(Color::Red),
            bar_tv_show: Style::default().fg(Color::Cyan),
            bar_default: Style::default().fg(Color::LightRed),
            bar_empty: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            accent: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().fg(Color::DarkGray),

            bar_movie: Style::default().fg(Color::Red),
            bar_tv_show: Style::default().fg(Color::Blue),
            bar_default: Style::default().fg(Color::Red),
            bar_empty: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette and no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::White),
            accent: Style::default().fg(Color::Red),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default().fg(Color::Red).add_modifier(Modifier::REVERSED),
            tab_inactive: Style::default().fg(Color::White),

            bar_movie: Style::default().fg(Color::Red),
            bar_tv_show: Style::default().fg(Color::Cyan),
            bar_default: Style::default().fg(Color::Red),
            bar_empty: Style::default().fg(Color::DarkGray),

            table_header: Style::default().fg(Color::Red),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Bar fill for a content-type label.
    pub fn type_style(&self, label: &str) -> Style {
        match label {
            "Movie" => self.bar_movie,
            "TV Show" => self.bar_tv_show,
            _ => self.bar_default,
        }
    }

    /// Alternating row style for zebra-striped tables.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
