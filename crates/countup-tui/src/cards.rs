//! Statistic cards: one bordered box per counter.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::{CardState, CardStatus};
use crate::styles::ColorTheme;

/// Cards narrower than this are stacked vertically.
const MIN_CARD_WIDTH: u16 = 14;

fn status_text(card: &CardState) -> String {
    match card.status {
        CardStatus::Waiting => "waiting".to_string(),
        CardStatus::Counting => format!("{:.0}%", card.fraction * 100.0),
        CardStatus::Done => "done".to_string(),
        CardStatus::Stopped => "stopped".to_string(),
    }
}

/// Split `area` into one slot per card.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn card_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as u32;
    let direction = if usize::from(area.width) / count >= usize::from(MIN_CARD_WIDTH) {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    Layout::default()
        .direction(direction)
        .constraints(vec![Constraint::Ratio(1, n); count])
        .split(area)
        .to_vec()
}

/// Render every card.
pub fn render_cards(frame: &mut Frame, area: Rect, cards: &[CardState]) {
    let theme = ColorTheme::default();
    for (card, slot) in cards.iter().zip(card_areas(area, cards.len())) {
        let lines = vec![
            Line::from(Span::styled(card.display(), theme.value_style(card.status))),
            Line::from(card.label.as_str()),
            Line::from(Span::styled(status_text(card), theme.muted_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style());
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, slot);
    }
}
