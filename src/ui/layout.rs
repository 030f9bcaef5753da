use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions, top to bottom: header, falling-word field, optional
/// result panel, answer box, key hints.
pub struct GameLayout {
    pub header: Rect,
    pub field: Rect,
    pub result: Option<Rect>,
    pub input: Rect,
    pub footer: Rect,
}

impl GameLayout {
    pub const RESULT_HEIGHT: u16 = 9;

    pub fn new(area: Rect, show_result: bool) -> Self {
        // Drop the result panel on short terminals rather than crushing the field
        let show_result = show_result && area.height >= 24;
        let result_height = if show_result { Self::RESULT_HEIGHT } else { 0 };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(result_height),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            field: vertical[1],
            result: show_result.then_some(vertical[2]),
            input: centered_columns(60, vertical[3]),
            footer: vertical[4],
        }
    }
}

/// Horizontally centre a column of at most `max_width` cells.
pub fn centered_columns(max_width: u16, area: Rect) -> Rect {
    let width = area.width.min(max_width);
    let left = area.x + (area.width - width) / 2;
    Rect::new(left, area.y, width, area.height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 10;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_panel_only_when_tall_enough() {
        let tall = GameLayout::new(Rect::new(0, 0, 100, 40), true);
        assert!(tall.result.is_some());
        let short = GameLayout::new(Rect::new(0, 0, 100, 20), true);
        assert!(short.result.is_none());
        let hidden = GameLayout::new(Rect::new(0, 0, 100, 40), false);
        assert!(hidden.result.is_none());
    }

    #[test]
    fn input_is_centred_and_capped() {
        let layout = GameLayout::new(Rect::new(0, 0, 100, 30), false);
        assert_eq!(layout.input.width, 60);
        assert_eq!(layout.input.x, 20);
    }

    #[test]
    fn centered_rect_respects_area() {
        let area = Rect::new(0, 0, 30, 8);
        let r = centered_rect(50, 50, area);
        assert!(r.width <= area.width && r.height <= area.height);
    }
}
