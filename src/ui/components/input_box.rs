use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::game::state::{RoundStatus, Snapshot};
use crate::ui::theme::Theme;

/// Answer field with a one-line status message above it.
pub struct InputBox<'a> {
    snapshot: &'a Snapshot,
    theme: &'a Theme,
    now: Instant,
}

impl<'a> InputBox<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme, now: Instant) -> Self {
        Self {
            snapshot,
            theme,
            now,
        }
    }
}

pub fn status_message(snapshot: &Snapshot, now: Instant) -> Option<String> {
    match snapshot.status {
        RoundStatus::Win => Some(match snapshot.auto_advance_in(now) {
            Some(left) => format!("CORRECT! NEXT IN {}s...", left.as_secs_f64().ceil() as u64),
            None => "CORRECT! PRESS ENTER FOR THE NEXT WORD".to_string(),
        }),
        RoundStatus::Loss => Some("TIME'S UP! PRESS ENTER TO PLAY AGAIN (SCORE RESETS)".to_string()),
        RoundStatus::Active if snapshot.mistake => Some("WRONG! TRY AGAIN...".to_string()),
        _ => None,
    }
}

impl InputBox<'_> {
    fn accent(&self) -> Color {
        let colors = &self.theme.colors;
        match self.snapshot.status {
            RoundStatus::Win => colors.success(),
            RoundStatus::Loss => colors.error(),
            _ if self.snapshot.error_flag || self.snapshot.mistake => colors.error(),
            RoundStatus::Active => colors.accent(),
            _ => colors.border(),
        }
    }
}

impl Widget for InputBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let accent = self.accent();
        if let Some(msg) = status_message(self.snapshot, self.now) {
            Paragraph::new(Line::from(Span::styled(
                msg,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(rows[0], buf);
        }

        // Shake: nudge the box sideways while the error flash is on
        let mut field = rows[1];
        if self.snapshot.error_flag && field.width > 4 {
            field.x += 1;
            field.width -= 2;
        }

        let text = if self.snapshot.input_visible {
            self.snapshot.input_value.as_str()
        } else {
            ""
        };
        let placeholder = self.snapshot.status == RoundStatus::Active && text.is_empty();
        let line = if placeholder {
            Line::from(Span::styled(
                "type the word here...",
                Style::default().fg(colors.muted()),
            ))
        } else {
            Line::from(Span::styled(
                text,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
        };

        let block = Block::bordered()
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(line)
            .block(block)
            .alignment(Alignment::Center)
            .render(field, buf);
    }
}
