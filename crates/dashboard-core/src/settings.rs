use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore the Netflix titles catalogue from the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "netflix-dashboard",
    about = "Explore the Netflix titles catalogue from the terminal",
    version
)]
pub struct Settings {
    /// Path to the titles CSV file
    #[arg(long, env = "NETFLIX_DATA", default_value = "netflix_titles.csv")]
    pub data: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report"])]
    pub view: String,

    /// Report output format (report view only)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// First year (of date added) to include
    #[arg(long)]
    pub year_from: Option<i32>,

    /// Last year (of date added) to include
    #[arg(long)]
    pub year_to: Option<i32>,

    /// Content type to include; repeat for several (default: all)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Country to include; repeat for several (default: all)
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Number of rows shown in ranked tables
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub top: u16,

    /// Drop exact duplicate rows before cleaning
    #[arg(long)]
    pub dedupe: bool,

    /// Display theme
    #[arg(long, env = "NETFLIX_DASHBOARD_THEME", default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Set by [`Settings::load`] when `--year-from` was after `--year-to` and
    /// the bounds were swapped. Logged by the caller once logging is up.
    #[arg(skip)]
    pub year_range_swapped: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag and normalise the year range so that
    /// `year_from <= year_to`.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        if let (Some(from), Some(to)) = (settings.year_from, settings.year_to) {
            if from > to {
                settings.year_range_swapped = true;
                settings.year_from = Some(to);
                settings.year_to = Some(from);
            }
        }

        settings
    }

    /// Inclusive year-added range, or `None` when neither bound was given.
    /// A missing bound is open-ended.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        match (self.year_from, self.year_to) {
            (None, None) => None,
            (from, to) => Some((from.unwrap_or(i32::MIN), to.unwrap_or(i32::MAX))),
        }
    }

    pub fn is_report(&self) -> bool {
        self.view == "report"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
