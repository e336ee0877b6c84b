//! Campus sidebar
//!
//! One boxed entry per campus, stacked top to bottom. Each entry's on-screen
//! rectangle is recorded so mouse clicks can be mapped back to a campus.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Padding, Paragraph},
};
use unari_app::{App, Region, RegionMap};

use crate::Theme;

const ENTRY_HEIGHT: u16 = 3;
const ENTRY_GAP: u16 = 1;

/// Render the sidebar and return one region per fully visible campus entry.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) -> RegionMap {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.sidebar_border)
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut regions = RegionMap::new();

    for (i, campus) in app.campuses().campuses().iter().enumerate() {
        let offset = u16::try_from(i).unwrap_or(u16::MAX).saturating_mul(ENTRY_HEIGHT + ENTRY_GAP);
        let top = inner.y.saturating_add(offset);
        let entry = Rect::new(inner.x, top, inner.width, ENTRY_HEIGHT).intersection(inner);
        // Entries cut short by the bottom edge would lose their label.
        if entry.is_empty() || entry.height < ENTRY_HEIGHT {
            break;
        }

        let style = if i == app.campus_index() { theme.campus_selected } else { theme.campus };
        let label = Paragraph::new(vec![
            Line::default(),
            Line::from(campus.name.as_str()),
            Line::default(),
        ])
        .alignment(Alignment::Center)
        .style(style);

        frame.render_widget(label, entry);
        regions.insert(campus.name.clone(), Region::new(entry.x, entry.y, entry.width, entry.height));
    }

    regions
}
