//! TUI header panel.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Render the header: counter count, elapsed time and overall status.
pub fn render_header(frame: &mut Frame, area: Rect, counters: usize, elapsed: Duration, status: &str) {
    let theme = ColorTheme::default();
    let text = vec![Line::from(vec![
        Span::styled("countup", theme.title_style()),
        Span::raw(format!(
            " | {counters} counters | {:.1}s | {status}",
            elapsed.as_secs_f64()
        )),
    ])];

    let block = Block::default().borders(Borders::BOTTOM);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn header_shows_status() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_header(frame, area, 4, Duration::from_millis(1500), "counting");
            })
            .unwrap();
        let row: String = (0..buf.area.width)
            .map(|x| buf.buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(row.contains("4 counters"));
        assert!(row.contains("1.5s"));
        assert!(row.contains("counting"));
    }
}
