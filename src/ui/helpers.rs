use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for the login box and modal notices.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Build footer spans from `(key, description)` pairs.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, description)) in hints.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        if idx + 1 == hints.len() {
            spans.push(Span::raw(format!(" {description}")));
        } else {
            spans.push(Span::raw(format!(" {description}   ")));
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, area);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 25);
        assert_eq!(inner.y, 10);
    }

    #[test]
    fn key_hints_pair_keys_with_descriptions() {
        let spans = key_hints(&[("Ctrl-A", "Add"), ("Ctrl-Q", "Quit")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[Ctrl-A] Add   [Ctrl-Q] Quit");
    }
}
