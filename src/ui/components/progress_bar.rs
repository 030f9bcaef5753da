use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Widget};

use crate::game::timer::TimerValue;
use crate::ui::theme::Theme;

/// Remaining time budget, shrinking from full to empty.
pub struct TimerBar<'a> {
    pub value: TimerValue,
    pub theme: &'a Theme,
}

impl<'a> TimerBar<'a> {
    pub fn new(value: TimerValue, theme: &'a Theme) -> Self {
        Self { value, theme }
    }

    fn left_ratio(&self) -> f64 {
        (1.0 - self.value.ratio()).clamp(0.0, 1.0)
    }

    fn label(&self) -> String {
        match self.value {
            TimerValue::Progress(_) => format!("{:.0}%", self.left_ratio() * 100.0),
            TimerValue::Remaining { secs, .. } => format!("{secs}s"),
        }
    }
}

/// Green while more than 60% is left, amber down to 30%, red below.
pub fn budget_color(left_ratio: f64, theme: &Theme) -> Color {
    let colors = &theme.colors;
    if left_ratio < 0.3 {
        colors.error()
    } else if left_ratio < 0.6 {
        colors.warning()
    } else {
        colors.bar_filled()
    }
}

impl Widget for TimerBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Time ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let left = self.left_ratio();
        let filled_width = (left * inner.width as f64) as u16;
        let fill = budget_color(left, self.theme);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label = self.label();
        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
