//! Key-hint footer

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

use crate::Theme;

const QUIT_HINT: &str = "q: quit";
const NAV_HINTS: &str = "↑/↓: campus    t: today    ←/→: date";

/// Render the footer: quit hint on the left, navigation hints on the right.
pub fn render(frame: &mut Frame, theme: &Theme, area: Rect) {
    let quit = Line::from(QUIT_HINT);
    let quit_width = u16::try_from(quit.width()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(quit_width), Constraint::Min(0)])
        .split(area);

    let [left, right] = chunks.as_ref() else {
        return;
    };

    frame.render_widget(Paragraph::new(quit).style(theme.footer), *left);
    frame.render_widget(
        Paragraph::new(Line::from(NAV_HINTS)).style(theme.footer).alignment(Alignment::Right),
        *right,
    );
}
