//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. Rendering performs no I/O: it draws into the frame and
//! reports where the clickable campus entries ended up.

mod footer;
mod menu;
mod notice;
mod sidebar;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use unari_app::{App, RegionMap};

pub use menu::{DATA_UNAVAILABLE, NO_DATA, format_date};
pub use notice::{LOADING, TOO_SMALL};

use crate::Theme;

/// Fixed width of the campus sidebar, border included.
pub const SIDEBAR_WIDTH: u16 = 24;
/// Height of the key-hint footer.
pub const FOOTER_HEIGHT: u16 = 1;
/// Smallest terminal width that gets the full layout.
pub const MIN_WIDTH: u16 = 40;
/// Smallest terminal height that gets the full layout.
pub const MIN_HEIGHT: u16 = 10;

/// Render the entire UI and return the hit-test regions it produced.
///
/// Loading and too-small frames draw a single centered message and return
/// an empty map, so no click can select a campus that is not on screen.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) -> RegionMap {
    let (width, height) = app.terminal_size();
    let area = Rect::new(0, 0, width, height).intersection(frame.area());

    if app.is_loading() {
        notice::render(frame, area, LOADING, theme);
        return RegionMap::new();
    }

    if width < MIN_WIDTH || height < MIN_HEIGHT {
        notice::render(frame, area, TOO_SMALL, theme);
        return RegionMap::new();
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);

    let [main_area, footer_area] = chunks.as_ref() else {
        return RegionMap::new();
    };

    let regions = render_main_area(frame, app, theme, *main_area);
    footer::render(frame, theme, *footer_area);
    regions
}

/// Render the main area (campus sidebar + menu pane).
fn render_main_area(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) -> RegionMap {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    let [sidebar_area, menu_area] = chunks.as_ref() else {
        return RegionMap::new();
    };

    let regions = sidebar::render(frame, app, theme, *sidebar_area);
    menu::render(frame, app, theme, *menu_area);
    regions
}
