use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::game::state::{RoundStatus, Snapshot};
use crate::game::timer::TimerValue;
use crate::ui::theme::Theme;

/// The play field. In fall mode the prompt drops from the top edge towards
/// the bottom as the round timer runs; in countdown mode it sits centred.
pub struct FallArea<'a> {
    snapshot: &'a Snapshot,
    theme: &'a Theme,
}

impl<'a> FallArea<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }
}

/// Split `text` into lines no wider than `width` characters, breaking on spaces.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Top row for a block of `block_height` rows at `progress` percent down a
/// field of `field_height` rows.
fn fall_row(progress: f64, field_height: u16, block_height: u16) -> u16 {
    let travel = field_height.saturating_sub(block_height);
    ((progress.clamp(0.0, 100.0) / 100.0) * travel as f64).round() as u16
}

impl Widget for FallArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Only a falling round draws its word; results live in their own panel
        if self.snapshot.status != RoundStatus::Active {
            return;
        }
        let Some(word) = self.snapshot.current_word.as_ref() else {
            return;
        };
        let prompt = self.snapshot.prompt().unwrap_or_default();

        let max_width = (inner.width as usize * 4 / 5).max(1);
        let mut lines: Vec<Line> = wrap_words(prompt, max_width)
            .into_iter()
            .map(|l| {
                Line::from(Span::styled(
                    l,
                    Style::default()
                        .fg(colors.prompt())
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        lines.push(Line::from(Span::styled(
            format!("({})", word.word_type),
            Style::default()
                .fg(colors.muted())
                .add_modifier(Modifier::ITALIC),
        )));

        let height = (lines.len() as u16).min(inner.height);
        let row = match self.snapshot.timer {
            Some(TimerValue::Progress(pct)) => fall_row(pct, inner.height, height),
            _ => inner.height.saturating_sub(height) / 2,
        };

        let word_area = Rect::new(inner.x, inner.y + row, inner.width, height);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(word_area, buf);

        if let Some(TimerValue::Remaining { secs, .. }) = self.snapshot.timer {
            let badge = format!(" {secs}s ");
            let x = inner.x + inner.width.saturating_sub(badge.len() as u16 + 1);
            buf.set_string(
                x,
                inner.y,
                &badge,
                Style::default()
                    .fg(colors.muted())
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_spaces() {
        assert_eq!(wrap_words("con mèo nhỏ", 7), vec!["con mèo", "nhỏ"]);
        assert_eq!(wrap_words("a", 10), vec!["a"]);
        assert!(wrap_words("   ", 10).is_empty());
    }

    #[test]
    fn wrap_keeps_overlong_word_whole() {
        assert_eq!(wrap_words("internationalization x", 5), vec!["internationalization", "x"]);
    }

    #[test]
    fn fall_row_spans_field() {
        assert_eq!(fall_row(0.0, 20, 2), 0);
        assert_eq!(fall_row(50.0, 20, 2), 9);
        assert_eq!(fall_row(100.0, 20, 2), 18);
        assert_eq!(fall_row(150.0, 20, 2), 18);
        assert_eq!(fall_row(100.0, 1, 3), 0);
    }
}
