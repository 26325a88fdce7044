//! Main TUI application state and logic

use crate::demos::DEMOS;
use crate::parser::parser::{ParseOutcome, Parser, ParserOptions};
use crate::trace::TraceEvent;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{
    SourceRenderData, SourceScrollState, StackScrollState, StatusRenderData, TraceScrollState,
};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Trace,
    Stack,
    Grammar,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> trace -> grammar -> stack)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::Grammar,
            FocusedPane::Grammar => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Stack,
            FocusedPane::Trace => FocusedPane::Source,
            FocusedPane::Grammar => FocusedPane::Trace,
            FocusedPane::Stack => FocusedPane::Grammar,
        }
    }
}

/// The main application state
pub struct App {
    /// Parser reused for every program shown
    parser: Parser,

    /// The program being analyzed
    pub source_code: String,

    /// Shown in the source pane title
    pub title: String,

    /// Verdict and trace for `source_code`
    pub outcome: ParseOutcome,

    /// Index of the trace step on screen
    pub position: usize,

    /// Canned example currently loaded (0-based), `None` for a user file
    pub demo_index: Option<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub trace_scroll: TraceScrollState,
    pub stack_scroll: StackScrollState,
    pub grammar_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app and parse `source_code` right away
    pub fn new(source_code: String, title: impl Into<String>, options: ParserOptions) -> Self {
        let parser = Parser::with_options(options);
        let outcome = parser.parse(&source_code);
        App {
            parser,
            source_code,
            title: title.into(),
            outcome,
            position: 0,
            demo_index: None,
            focused_pane: FocusedPane::Trace,
            source_scroll: SourceScrollState::default(),
            trace_scroll: TraceScrollState::default(),
            stack_scroll: StackScrollState::default(),
            grammar_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Create an app showing canned example `index` (0-based)
    pub fn with_demo(index: usize, options: ParserOptions) -> Self {
        let demo = &DEMOS[index % DEMOS.len()];
        let mut app = App::new(demo.source.to_string(), demo.title, options);
        app.demo_index = Some(index % DEMOS.len());
        app
    }

    /// Number of trace steps
    pub fn total_steps(&self) -> usize {
        self.outcome.trace.len()
    }

    fn is_at_end(&self) -> bool {
        self.position + 1 >= self.total_steps()
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(400) {
                if self.is_at_end() {
                    self.is_playing = false;
                    self.status_message = self.verdict_message();
                } else {
                    self.position += 1;
                    self.status_message = "Playing...".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Trace (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[0]);

        // Right column: Stack (top) | Grammar (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let entry = self.outcome.trace.get(self.position);
        let current_line = entry
            .and_then(|e| e.location)
            .map_or(0, |location| location.line);
        let is_error = !self.outcome.accepted && self.is_at_end();
        let expanding = entry.and_then(|e| match &e.event {
            TraceEvent::Apply { non_terminal, .. } => Some(*non_terminal),
            _ => None,
        });

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            SourceRenderData {
                source_code: &self.source_code,
                title: &self.title,
                current_line,
                is_error,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_trace_pane(
            frame,
            left_rows[1],
            &self.outcome.trace,
            self.position,
            self.focused_pane == FocusedPane::Trace,
            &mut self.trace_scroll,
        );

        super::panes::render_stack_pane(
            frame,
            right_rows[0],
            &self.outcome.trace,
            self.position,
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        super::panes::render_grammar_pane(
            frame,
            right_rows[1],
            expanding,
            self.focused_pane == FocusedPane::Grammar,
            &mut self.grammar_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                current_step: self.position,
                total_steps: self.total_steps(),
                accepted: self.outcome.accepted,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.is_playing = false;
                self.next_demo();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Trace => {
                    self.trace_scroll.offset = self.trace_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Grammar => {
                    self.grammar_scroll = self.grammar_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Trace => {
                    self.trace_scroll.offset = self.trace_scroll.offset.saturating_add(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_add(1);
                }
                FocusedPane::Grammar => {
                    self.grammar_scroll = self.grammar_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now();
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.position = self.total_steps().saturating_sub(1);
                self.status_message = self.verdict_message();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.position = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn step_forward(&mut self) {
        if self.is_at_end() {
            self.status_message = format!("Cannot step forward: {}", self.verdict_message());
        } else {
            self.position += 1;
            self.status_message = if self.is_at_end() {
                self.verdict_message()
            } else {
                "Stepped forward".to_string()
            };
        }
    }

    fn step_backward(&mut self) {
        if self.position == 0 {
            self.status_message = "Cannot step backward: already at start".to_string();
        } else {
            self.position -= 1;
            self.status_message = "Stepped backward".to_string();
        }
    }

    /// Load the next canned example and parse it
    fn next_demo(&mut self) {
        let index = self.demo_index.map_or(0, |i| (i + 1) % DEMOS.len());
        let demo = &DEMOS[index];
        self.source_code = demo.source.to_string();
        self.title = demo.title.to_string();
        self.outcome = self.parser.parse(&self.source_code);
        self.demo_index = Some(index);
        self.position = 0;
        self.source_scroll = SourceScrollState::default();
        self.trace_scroll = TraceScrollState::default();
        self.stack_scroll = StackScrollState::default();
        self.status_message = format!("Loaded example {}: {}", index + 1, demo.title);
    }

    fn verdict_message(&self) -> String {
        match &self.outcome.error {
            Some(error) if error.is_pre_parse() => format!("Rejected before parsing: {}", error),
            Some(error) => format!("Rejected: {}", error),
            None => "Accepted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_stepping_stays_in_bounds() {
        let mut app = App::new("x = 1;".to_string(), "test", ParserOptions::default());
        press(&mut app, KeyCode::Left);
        assert_eq!(app.position, 0);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.position, app.total_steps() - 1);
        assert_eq!(app.status_message, "Accepted");

        press(&mut app, KeyCode::Right);
        assert_eq!(app.position, app.total_steps() - 1);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.position, 0);
    }

    #[test]
    fn test_rejected_verdict_in_status() {
        let mut app = App::new("x = ;".to_string(), "test", ParserOptions::default());
        press(&mut app, KeyCode::Enter);
        assert!(app.status_message.starts_with("Rejected: syntax error"));
    }

    #[test]
    fn test_lexical_error_labelled_before_parsing() {
        let mut app = App::new("x = 1 @ 2;".to_string(), "test", ParserOptions::default());
        assert_eq!(app.total_steps(), 1);
        press(&mut app, KeyCode::Enter);
        assert!(app.status_message.starts_with("Rejected before parsing: lexical error"));
    }

    #[test]
    fn test_cycle_examples() {
        let mut app = App::new(String::new(), "empty", ParserOptions::default());
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.demo_index, Some(0));
        assert_eq!(app.title, DEMOS[0].title);
        assert!(app.outcome.accepted);

        for _ in 0..DEMOS.len() {
            press(&mut app, KeyCode::Char('e'));
        }
        assert_eq!(app.demo_index, Some(0));
    }

    #[test]
    fn test_focus_cycle() {
        let mut pane = FocusedPane::Source;
        for _ in 0..4 {
            assert_eq!(pane.next().prev(), pane);
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
    }
}
