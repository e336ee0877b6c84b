//! Full-screen messages shown instead of the normal layout.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Line,
    widgets::Paragraph,
};

use crate::Theme;

/// Shown until the first fetch settles.
pub const LOADING: &str = "Loading";
/// Shown when the terminal is below the minimum size.
pub const TOO_SMALL: &str = "Terminal too small";

/// Draw `text` centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    if area.is_empty() {
        return;
    }

    let row = Rect::new(area.x, area.y + (area.height - 1) / 2, area.width, 1);
    let message = Paragraph::new(Line::from(text)).style(theme.banner).alignment(Alignment::Center);

    frame.render_widget(message, row);
}
