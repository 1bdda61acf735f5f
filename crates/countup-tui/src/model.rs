//! TUI application model (Elm architecture).

use std::io;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tracing::debug;

use countup_core::format::format_value;
use countup_core::{CancellationToken, CounterStrip, FrameLoop, StatEntry};

use crate::cards::render_cards;
use crate::driver::StripDriver;
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_logs, visible_rows, LogScrollState, MAX_LOG_LINES};
use crate::messages::TuiMessage;

/// Lifecycle of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Waiting,
    Counting,
    Done,
    Stopped,
}

impl CardStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, CardStatus::Done | CardStatus::Stopped)
    }
}

/// Displayed state of one counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub label: String,
    pub suffix: String,
    pub start: f64,
    pub target: f64,
    pub value: f64,
    pub fraction: f64,
    pub status: CardStatus,
}

impl CardState {
    #[must_use]
    pub fn from_entry(entry: &StatEntry, start: f64) -> Self {
        Self {
            label: entry.label.clone(),
            suffix: entry.suffix.clone(),
            start,
            target: entry.value,
            value: start,
            fraction: 0.0,
            status: CardStatus::Waiting,
        }
    }

    /// Displayed text, e.g. `5,000+`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", format_value(self.value), self.suffix)
    }

    fn restart(&mut self, label: &str, target: f64) {
        label.clone_into(&mut self.label);
        self.target = target;
        self.value = self.start;
        self.fraction = 0.0;
        self.status = CardStatus::Counting;
    }
}

/// TUI application state (Elm Model).
pub struct TuiApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether the user interrupted with Ctrl+C.
    pub cancelled: bool,
    /// One card per counter, in strip order.
    pub cards: Vec<CardState>,
    /// Event log lines.
    pub logs: Vec<String>,
    pub log_scroll: LogScrollState,
    pub show_logs: bool,
    pub terminal_width: u16,
    pub terminal_height: u16,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    rx: Receiver<TuiMessage>,
    driver: Option<StripDriver>,
    cancel: CancellationToken,
}

impl TuiApp {
    /// Create an app showing `strip`, fed by `rx`.
    #[must_use]
    pub fn new(rx: Receiver<TuiMessage>, strip: &CounterStrip) -> Self {
        Self {
            should_quit: false,
            cancelled: false,
            cards: strip
                .entries()
                .iter()
                .map(|e| CardState::from_entry(e, strip.start_value()))
                .collect(),
            logs: Vec::new(),
            log_scroll: LogScrollState::new(),
            show_logs: true,
            terminal_width: 80,
            terminal_height: 24,
            started_at: None,
            finished_at: None,
            rx,
            driver: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Let the app start, stop and restart the strip.
    #[must_use]
    pub fn with_driver(mut self, driver: StripDriver) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Quit as cancelled once `token` fires.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Start the strip through the driver, logging a failure.
    pub fn start(&mut self) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        if let Err(e) = driver.start() {
            self.handle_message(TuiMessage::Error(e.to_string()));
        }
    }

    /// Update the model with incoming messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    fn card_mut(&mut self, index: usize) -> &mut CardState {
        while self.cards.len() <= index {
            self.cards.push(CardState::from_entry(&StatEntry::new("", 0.0), 0.0));
        }
        &mut self.cards[index]
    }

    fn push_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOG_LINES {
            self.logs.remove(0);
            if !self.log_scroll.follow {
                self.log_scroll.on_evicted();
            }
        }
    }

    fn check_finished(&mut self) {
        if self.finished_at.is_none() && self.all_finished() {
            self.finished_at = Some(Instant::now());
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Started { index, label, target } => {
                if index == 0 {
                    self.started_at = Some(Instant::now());
                    self.finished_at = None;
                }
                self.card_mut(index).restart(&label, target);
            }
            TuiMessage::Value { index, value, fraction } => {
                let card = self.card_mut(index);
                card.value = value;
                card.fraction = fraction;
                if card.status == CardStatus::Waiting {
                    card.status = CardStatus::Counting;
                }
            }
            TuiMessage::Completed { index } => {
                let card = self.card_mut(index);
                card.fraction = 1.0;
                card.status = CardStatus::Done;
                self.check_finished();
            }
            TuiMessage::Stopped { index, last_value } => {
                let card = self.card_mut(index);
                card.value = last_value;
                card.status = CardStatus::Stopped;
                self.check_finished();
            }
            TuiMessage::Log(line) => self.push_log(line),
            TuiMessage::Error(err) => self.push_log(format!("[ERROR] {err}")),
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::KeyPress(action) => self.handle_key_action(action),
            TuiMessage::Quit => self.should_quit = true,
        }
    }

    fn log_rows(&self) -> usize {
        let area = Rect::new(0, 0, self.terminal_width, self.terminal_height);
        Self::compute_layout(area, self.show_logs)
            .2
            .map_or(0, visible_rows)
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        let total = self.logs.len();
        let rows = self.log_rows();
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Cancel => {
                self.cancelled = true;
                self.should_quit = true;
            }
            KeyAction::Stop => {
                if let Some(driver) = &self.driver {
                    driver.stop();
                }
            }
            KeyAction::Restart => self.start(),
            KeyAction::ToggleLogs => self.show_logs = !self.show_logs,
            KeyAction::ScrollUp => self.log_scroll.up(1, total, rows),
            KeyAction::ScrollDown => self.log_scroll.down(1, total, rows),
            KeyAction::PageUp => self.log_scroll.up(rows.max(1), total, rows),
            KeyAction::PageDown => self.log_scroll.down(rows.max(1), total, rows),
            KeyAction::Home => self.log_scroll.home(),
            KeyAction::End => self.log_scroll.end(),
            KeyAction::None => {}
        }
    }

    /// Whether every card reached a terminal state.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.status.is_terminal())
    }

    /// Overall status shown in the header.
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.started_at.is_none() {
            "waiting"
        } else if !self.all_finished() {
            "counting"
        } else if self.cards.iter().any(|c| c.status == CardStatus::Stopped) {
            "stopped"
        } else {
            "done"
        }
    }

    /// Time since the strip started, frozen once it finished.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Layout: header, cards, optional logs, footer.
    #[must_use]
    pub fn compute_layout(area: Rect, show_logs: bool) -> (Rect, Rect, Option<Rect>, Rect) {
        let mut constraints = vec![Constraint::Length(2), Constraint::Min(5)];
        if show_logs {
            constraints.push(Constraint::Length(8));
        }
        constraints.push(Constraint::Length(2));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        if show_logs {
            (chunks[0], chunks[1], Some(chunks[2]), chunks[3])
        } else {
            (chunks[0], chunks[1], None, chunks[2])
        }
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let (header_area, cards_area, logs_area, footer_area) =
            Self::compute_layout(frame.area(), self.show_logs);

        render_header(frame, header_area, self.cards.len(), self.elapsed(), self.status());
        render_cards(frame, cards_area, &self.cards);
        if let Some(area) = logs_area {
            render_logs(frame, area, &self.logs, &self.log_scroll);
        }
        render_footer(frame, footer_area);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop on `frames`.
    ///
    /// Each iteration pumps one animation frame, applies the resulting
    /// messages, renders, then waits up to one frame interval for input.
    /// Running counters are stopped when the loop exits.
    pub fn run(&mut self, frames: &FrameLoop) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        if let Ok(size) = terminal.size() {
            self.terminal_width = size.width;
            self.terminal_height = size.height;
        }
        let result = self.event_loop(&mut terminal, frames);
        if let Some(driver) = &self.driver {
            driver.stop();
        }
        Self::teardown_terminal(&mut terminal)?;
        debug!(frames = frames.frames_fired(), cancelled = self.cancelled, "dashboard closed");
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        frames: &FrameLoop,
    ) -> io::Result<()> {
        loop {
            if self.cancel.is_cancelled() {
                self.cancelled = true;
                self.should_quit = true;
            }

            frames.pump();
            self.update();

            terminal.draw(|frame| self.render(frame))?;
            if self.should_quit {
                return Ok(());
            }

            if event::poll(frames.frame_interval())? {
                match event::read()? {
                    Event::Key(key) => self.handle_key_action(map_key(key)),
                    Event::Resize(width, height) => {
                        self.handle_message(TuiMessage::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    }
}
