//! Menu pane
//!
//! Date header followed by one section per restaurant serving on the
//! selected date.

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, BorderType, Padding, Paragraph},
};
use unari_app::App;

use crate::Theme;

/// Shown when the selected campus has nothing on the selected date.
pub const NO_DATA: &str = "No data for this date.";
/// Shown when the menu fetch failed.
pub const DATA_UNAVAILABLE: &str = "Menu data is currently unavailable.";

const ITEM_BULLET: &str = " • ";

/// Header text for `date`, e.g. `Monday 02.06.2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A %d.%m.%Y").to_string()
}

/// Render the menu pane.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.content_border)
        .padding(Padding::new(2, 2, 1, 1));

    let mut lines = vec![Line::styled(format_date(app.selected_date()), theme.date_header)];

    if app.data_available() {
        let sections = app.visible_menu();
        if sections.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled(NO_DATA, theme.notice));
        }

        for section in sections {
            lines.push(Line::default());
            lines.push(Line::styled(section.restaurant, theme.restaurant));
            lines.extend(
                section.items.iter().map(|item| Line::styled(format!("{ITEM_BULLET}{item}"), theme.meal)),
            );
        }
    } else {
        lines.push(Line::default());
        lines.push(Line::styled(DATA_UNAVAILABLE, theme.notice));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
