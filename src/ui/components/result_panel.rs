use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;
use crate::vocab::VocabularyEntry;

/// Word details shown once a round is decided.
pub struct ResultPanel<'a> {
    pub word: &'a VocabularyEntry,
    pub passed: bool,
    pub theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(word: &'a VocabularyEntry, passed: bool, theme: &'a Theme) -> Self {
        Self {
            word,
            passed,
            theme,
        }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (badge, badge_color) = if self.passed {
            (" PASSED ", colors.success())
        } else {
            (" FAILED ", colors.error())
        };

        let block = Block::bordered()
            .border_style(Style::default().fg(badge_color))
            .style(Style::default().bg(colors.bg()));

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    badge,
                    Style::default()
                        .fg(colors.bg())
                        .bg(badge_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    self.word.english.to_uppercase(),
                    Style::default()
                        .fg(colors.prompt())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  /{}/", self.word.word_type),
                    Style::default().fg(colors.muted()),
                ),
            ]),
            Line::from(Span::styled(
                self.word.translation.as_str(),
                Style::default().fg(colors.accent()),
            )),
            Line::from(""),
        ];
        if !self.word.example.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("\"{}\"", self.word.example),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        if !self.word.example_translation.is_empty() {
            lines.push(Line::from(Span::styled(
                self.word.example_translation.as_str(),
                Style::default().fg(colors.muted()),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] continue",
            Style::default().fg(colors.muted()),
        )));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
