//! Scrollable event log panel.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// Maximum number of retained log lines.
pub const MAX_LOG_LINES: usize = 200;

/// Scroll position of the log panel.
///
/// `offset` is the first visible line. While `follow` is set the panel
/// sticks to the newest lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogScrollState {
    pub offset: usize,
    pub follow: bool,
}

impl LogScrollState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            follow: true,
        }
    }

    /// Offset actually used for `total` lines in a panel of `visible` rows.
    #[must_use]
    pub fn effective_offset(&self, total: usize, visible: usize) -> usize {
        let max = total.saturating_sub(visible);
        if self.follow {
            max
        } else {
            self.offset.min(max)
        }
    }

    /// The oldest line was evicted; keep the same lines in view.
    pub fn on_evicted(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn up(&mut self, lines: usize, total: usize, visible: usize) {
        self.offset = self.effective_offset(total, visible).saturating_sub(lines);
        self.follow = false;
    }

    pub fn down(&mut self, lines: usize, total: usize, visible: usize) {
        let max = total.saturating_sub(visible);
        self.offset = (self.effective_offset(total, visible) + lines).min(max);
        self.follow = self.offset >= max;
    }

    pub fn home(&mut self) {
        self.offset = 0;
        self.follow = false;
    }

    pub fn end(&mut self) {
        self.follow = true;
    }
}

impl Default for LogScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows available for lines inside the bordered panel.
#[must_use]
pub fn visible_rows(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(2))
}

fn line_style(line: &str) -> Style {
    if line.starts_with("[ERROR]") {
        Style::default().fg(Color::Red)
    } else if line.starts_with("[WARN]") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Render the log panel.
pub fn render_logs(frame: &mut Frame, area: Rect, logs: &[String], scroll: &LogScrollState) {
    let visible = visible_rows(area);
    let offset = scroll.effective_offset(logs.len(), visible);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(offset)
        .take(visible)
        .map(|line| ListItem::new(Line::raw(line.as_str())).style(line_style(line)))
        .collect();

    let title = if scroll.follow || logs.len() <= visible {
        " Events ".to_string()
    } else {
        format!(" Events ({}/{}) ", offset + 1, logs.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}
