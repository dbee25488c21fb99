//! Main application state and TUI event loop for the Netflix dashboard.
//!
//! [`App`] owns the theme, the active tab and the session's
//! [`DataManager`]. Key presses map to [`Action`]s; filter actions edit the
//! manager's filter and the next frame re-aggregates from memory.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};

use dashboard_runtime::data_manager::DataManager;

use crate::components::header::Header;
use crate::dashboard_view;
use crate::themes::Theme;

// ── Tab ───────────────────────────────────────────────────────────────────────

/// Which chart the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Trends,
    Countries,
    Ratings,
    Genres,
    Durations,
    Timeline,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Overview,
        Tab::Trends,
        Tab::Countries,
        Tab::Ratings,
        Tab::Genres,
        Tab::Durations,
        Tab::Timeline,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Trends => "Trends",
            Tab::Countries => "Countries",
            Tab::Ratings => "Ratings",
            Tab::Genres => "Genres",
            Tab::Durations => "Durations",
            Tab::Timeline => "Timeline",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// Everything a key press can ask the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(Tab),
    /// Toggle one content-type label in the filter.
    ToggleType(&'static str),
    /// Move the whole year window by this many years.
    ShiftYears(i32),
    /// Move only the window's start year; negative widens.
    AdjustStartYear(i32),
    ResetFilter,
    Reload,
}

/// Map a key event to an [`Action`], or `None` for unbound keys.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Action::NextTab,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Action::PrevTab,
        KeyCode::Char(c @ '1'..='7') => {
            let idx = c as usize - '1' as usize;
            Action::SelectTab(Tab::ALL[idx])
        }
        KeyCode::Char('m') => Action::ToggleType("Movie"),
        KeyCode::Char('t') => Action::ToggleType("TV Show"),
        KeyCode::Char('[') => Action::ShiftYears(-1),
        KeyCode::Char(']') => Action::ShiftYears(1),
        KeyCode::Char('-') => Action::AdjustStartYear(1),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::AdjustStartYear(-1),
        KeyCode::Char('r') => Action::ResetFilter,
        KeyCode::Char('R') => Action::Reload,
        _ => return None,
    };
    Some(action)
}

const HELP: &str =
    "Tab/←→ switch  1-7 jump  m/t Movie/TV  [ ] shift years  - + narrow/widen  r reset  R reload  q quit";

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub tab: Tab,
    /// Row limit for ranked tables.
    pub top: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Short message shown in the footer (e.g. a failed reload).
    pub status: Option<String>,
    source: String,
    manager: DataManager,
}

impl App {
    pub fn new(theme_name: &str, manager: DataManager, top: usize) -> Self {
        let source = manager
            .data_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| manager.data_path().display().to_string());
        Self {
            theme: Theme::from_name(theme_name),
            tab: Tab::Overview,
            top,
            should_quit: false,
            status: None,
            source,
            manager,
        }
    }

    pub fn manager(&self) -> &DataManager {
        &self.manager
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout; the loop exits on
    /// `q`, `Esc` or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            self.refresh();
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = map_key(key) {
                            self.apply(action);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── State updates ─────────────────────────────────────────────────────────

    /// Make sure the manager holds a summary for the current filter.
    pub fn refresh(&mut self) {
        self.manager.summary();
    }

    pub fn apply(&mut self, action: Action) {
        tracing::debug!(?action, "key action");
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::SelectTab(tab) => self.tab = tab,
            Action::ToggleType(label) => {
                let known = self.manager.known_types();
                self.manager.update_filter(|f| f.toggle_type(label, &known));
            }
            Action::ShiftYears(delta) => self.move_year_window(delta, delta),
            Action::AdjustStartYear(delta) => self.move_year_window(delta, 0),
            Action::ResetFilter => {
                self.manager.reset_filter();
                self.status = None;
            }
            Action::Reload => {
                self.status = match self.manager.reload() {
                    Ok(()) => Some("Dataset reloaded".to_string()),
                    Err(e) => Some(format!("Reload failed: {}", e)),
                };
            }
        }
    }

    /// Move the year window's start by `start_delta` and end by `end_delta`,
    /// keeping it inside the dataset's year bounds and never inverted.
    fn move_year_window(&mut self, start_delta: i32, end_delta: i32) {
        let Some((min, max)) = self.manager.year_bounds() else {
            return;
        };
        let (from, to) = self
            .manager
            .filter()
            .year_added
            .map(|(from, to)| (from.max(min), to.min(max)))
            .unwrap_or((min, max));

        let new_from = from + start_delta;
        let new_to = to + end_delta;
        if new_from < min || new_to > max || new_from > new_to {
            return;
        }

        if (new_from, new_to) == (min, max) {
            self.manager.update_filter(|f| f.year_added = None);
        } else {
            self.manager
                .update_filter(|f| f.year_added = Some((new_from, new_to)));
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the current state. Call [`App::refresh`] first so a summary is
    /// cached for the active filter.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        let header = Header::new(&self.source, self.manager.filter(), &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider(Span::styled("|", self.theme.separator));
        frame.render_widget(tabs, tabs_area);

        match self.manager.cached_summary() {
            Some(summary) => {
                let top = self.top;
                let theme = &self.theme;
                match self.tab {
                    Tab::Overview => dashboard_view::render_overview(frame, body, summary, theme),
                    Tab::Trends => dashboard_view::render_trends(frame, body, summary, theme),
                    Tab::Countries => dashboard_view::render_ranked(
                        frame,
                        body,
                        "Countries",
                        "Country",
                        &summary.by_country,
                        top,
                        theme,
                    ),
                    Tab::Ratings => dashboard_view::render_ranked(
                        frame,
                        body,
                        "Ratings",
                        "Rating",
                        &summary.by_rating,
                        usize::MAX,
                        theme,
                    ),
                    Tab::Genres => dashboard_view::render_ranked(
                        frame,
                        body,
                        "Genres",
                        "Genre",
                        &summary.by_genre,
                        top,
                        theme,
                    ),
                    Tab::Durations => {
                        dashboard_view::render_durations(frame, body, summary, top, theme)
                    }
                    Tab::Timeline => dashboard_view::render_timeline(frame, body, summary, theme),
                }
            }
            None => {
                let message = self
                    .manager
                    .last_error()
                    .unwrap_or("No dataset loaded");
                dashboard_view::render_load_error(frame, body, message, &self.theme);
            }
        }

        let footer_line = match &self.status {
            Some(status) => Line::from(vec![
                Span::styled(status.clone(), self.theme.info),
                Span::raw("  "),
                Span::styled(HELP, self.theme.dim),
            ]),
            None => Line::from(Span::styled(HELP, self.theme.dim)),
        };
        frame.render_widget(Paragraph::new(footer_line), footer);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
