use std::io;
use std::sync::Arc;

use anyhow::Result;
use attune_core::{FilterCache, Parameter, ParameterVector, Record};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub mod controls;
pub mod results;

/// Steps taken per keypress when a coarse adjustment is requested.
const COARSE_STEPS: i32 = 10;

/// Application state for the interactive filter.
///
/// The record collection is loaded once and shared read-only; the parameter
/// vector belongs to the session and every change recomputes the qualifying
/// set through the cache.
#[derive(Debug)]
pub struct App {
    pub records: Arc<[Record]>,
    pub params: ParameterVector,
    pub cache: FilterCache,
    /// Index into [`Parameter::ALL`] of the focused slider.
    pub selected: usize,
    /// First visible row of the result table.
    pub result_offset: usize,
    /// Result rows that fit on screen, updated on each render.
    pub result_viewport: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
            params: ParameterVector::default(),
            cache: FilterCache::new(),
            selected: 0,
            result_offset: 0,
            result_viewport: 20,
            should_quit: false,
        }
    }

    pub fn selected_parameter(&self) -> Parameter {
        Parameter::ALL[self.selected.min(Parameter::ALL.len() - 1)]
    }

    /// Number of records in the current qualifying set.
    pub fn match_count(&mut self) -> usize {
        self.cache.indices(&self.records, &self.params).len()
    }

    fn adjust(&mut self, steps: i32) {
        let before = self.params;
        self.params.step(self.selected_parameter(), steps);
        if self.params != before {
            self.result_offset = 0;
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let coarse = modifiers.contains(KeyModifiers::SHIFT);
        let steps = if coarse { COARSE_STEPS } else { 1 };

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < Parameter::ALL.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('h') | KeyCode::Left => self.adjust(-steps),
            KeyCode::Char('l') | KeyCode::Right => self.adjust(steps),
            KeyCode::Char('H') => self.adjust(-COARSE_STEPS),
            KeyCode::Char('L') => self.adjust(COARSE_STEPS),
            KeyCode::Char('r') => {
                self.params = ParameterVector::default();
                self.result_offset = 0;
            }
            KeyCode::PageDown => {
                let last_page_start = self.match_count().saturating_sub(self.result_viewport);
                self.result_offset =
                    (self.result_offset + self.result_viewport).min(last_page_start);
            }
            KeyCode::PageUp => {
                self.result_offset = self.result_offset.saturating_sub(self.result_viewport);
            }
            _ => {}
        }
    }
}

/// Run the interactive filter.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(records: Vec<Record>) -> Result<()> {
    if records.is_empty() {
        println!("No data available.");
        return Ok(());
    }

    let app = App::new(records);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Log lines would be drawn over the alternate screen.
    let result = with_logging_silenced(|| run_event_loop(&mut terminal, app));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run `f` with the logger switched off, restoring the level afterwards.
fn with_logging_silenced<T>(f: impl FnOnce() -> T) -> T {
    let previous_level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);
    let result = f();
    log::set_max_level(previous_level);
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code, key.modifiers);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Sliders and results
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[0]);

    controls::render(frame, app, body[0]);
    results::render(frame, app, body[1]);
    render_help(frame, chunks[1]);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "  \u{2191}/k \u{2193}/j Select  \u{2190}/h \u{2192}/l Adjust  H/L x10  PgUp/PgDn Scroll  r Reset  q Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
