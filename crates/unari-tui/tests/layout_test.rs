//! Layout tests.
//!
//! Render the App into a ratatui `TestBackend` and check what a user would
//! see, along with the regions reported for mouse hit-testing.

use std::sync::Arc;

use chrono::NaiveDate;
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use unari_app::{App, AppEvent, MouseInput, Region, RegionMap};
use unari_core::{CampusDirectory, FetchError, MenuDay, MenuEntry, MenuRecord};
use unari_tui::{ColorSupport, Theme, ui};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn physicum_soup() -> Vec<MenuRecord> {
    vec![MenuRecord::new("Physicum", vec![MenuEntry {
        day: MenuDay { day: 2, month: 6 },
        items: vec!["Soup".into()],
    }])]
}

fn loaded_app(size: (u16, u16)) -> App {
    let mut app = App::new(Arc::new(CampusDirectory::helsinki()), monday(), size);
    let _ = app.handle(AppEvent::DataLoaded(Ok(physicum_soup())));
    app
}

fn draw(app: &App) -> (Buffer, RegionMap) {
    let (width, height) = app.terminal_size();
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let theme = Theme::for_colors(ColorSupport::TrueColor);

    let mut regions = RegionMap::new();
    terminal.draw(|frame| regions = ui::render(frame, app, &theme)).unwrap();
    (terminal.backend().buffer().clone(), regions)
}

fn row(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width).map(|x| buffer.cell((x, y)).map_or(" ", |c| c.symbol())).collect()
}

fn screen(buffer: &Buffer) -> String {
    (0..buffer.area.height).map(|y| row(buffer, y)).collect::<Vec<_>>().join("\n")
}

#[test]
fn loading_frame_is_only_the_message() {
    let app = App::new(Arc::new(CampusDirectory::helsinki()), monday(), (80, 24));
    let (buffer, regions) = draw(&app);

    assert_eq!(row(&buffer, 11).trim(), ui::LOADING);
    assert!(!screen(&buffer).contains("Kumpula"));
    assert!(regions.is_empty());
}

#[test]
fn loading_wins_over_too_small() {
    let app = App::new(Arc::new(CampusDirectory::helsinki()), monday(), (20, 5));
    let (buffer, regions) = draw(&app);

    assert!(screen(&buffer).contains(ui::LOADING));
    assert!(!screen(&buffer).contains(ui::TOO_SMALL));
    assert!(regions.is_empty());
}

#[test]
fn too_small_below_either_minimum() {
    for size in [(39, 10), (40, 9)] {
        let (buffer, regions) = draw(&loaded_app(size));
        let text = screen(&buffer);

        assert!(text.contains(ui::TOO_SMALL), "{size:?} should be too small");
        assert!(!text.contains("Kumpula"), "{size:?} should hide the sidebar");
        assert!(regions.is_empty());
    }
}

#[test]
fn minimum_size_gets_full_layout() {
    let (buffer, regions) = draw(&loaded_app((40, 10)));

    assert!(!screen(&buffer).contains(ui::TOO_SMALL));
    assert!(!regions.is_empty());
    assert!(row(&buffer, 9).starts_with("q: quit"));
}

#[test]
fn physicum_menu_on_kumpula() {
    let (buffer, _) = draw(&loaded_app((80, 24)));
    let text = screen(&buffer);

    assert!(text.contains(&ui::format_date(monday())));
    assert!(text.contains("Monday 02.06.2025"));
    assert!(text.contains("Physicum"));
    assert!(text.contains(" • Soup"));
    assert!(!text.contains(ui::NO_DATA));
}

#[test]
fn header_is_first_content_line() {
    let (buffer, _) = draw(&loaded_app((80, 24)));

    // Content border on row 0, padding on row 1.
    let header = row(&buffer, 2);
    let column = usize::from(ui::SIDEBAR_WIDTH) + 3;
    assert_eq!(header.chars().skip(column).take(17).collect::<String>(), "Monday 02.06.2025");
}

#[test]
fn other_day_has_no_data() {
    let mut app = loaded_app((80, 24));
    let _ = app.handle(AppEvent::DateForward);
    let (buffer, _) = draw(&app);
    let text = screen(&buffer);

    assert!(text.contains("Tuesday 03.06.2025"));
    assert!(text.contains(ui::NO_DATA));
    assert!(!text.contains("Physicum"));
}

#[test]
fn other_campus_has_no_data() {
    let mut app = loaded_app((80, 24));
    let _ = app.handle(AppEvent::NavigatePrev);
    let (buffer, _) = draw(&app);

    assert!(screen(&buffer).contains(ui::NO_DATA));
}

#[test]
fn failed_fetch_says_unavailable() {
    let mut app = App::new(Arc::new(CampusDirectory::helsinki()), monday(), (80, 24));
    let _ = app.handle(AppEvent::DataLoaded(Err(FetchError::Status(503))));
    let (buffer, regions) = draw(&app);
    let text = screen(&buffer);

    assert!(text.contains(ui::DATA_UNAVAILABLE));
    assert!(!text.contains(ui::NO_DATA));
    assert!(!regions.is_empty());
}

#[test]
fn sidebar_regions_match_entries() {
    let (buffer, regions) = draw(&loaded_app((80, 24)));

    // Border plus padding: two columns and one row inside the border.
    assert_eq!(regions.get("Keskusta"), Some(Region::new(3, 2, 18, 3)));
    assert_eq!(regions.get("Kumpula"), Some(Region::new(3, 6, 18, 3)));
    assert_eq!(regions.len(), CampusDirectory::helsinki().len());

    assert!(row(&buffer, 3).contains("Keskusta"));
    assert!(row(&buffer, 7).contains("Kumpula"));
    assert_eq!(regions.hit(10, 7), Some("Kumpula"));
    assert_eq!(regions.hit(10, 5), None);
}

#[test]
fn short_terminal_omits_partial_sidebar_entries() {
    let (_, regions) = draw(&loaded_app((60, 10)));

    // Five inner rows: Keskusta whole, no room for all of Kumpula.
    assert_eq!(regions.get("Keskusta"), Some(Region::new(3, 2, 18, 3)));
    assert_eq!(regions.get("Kumpula"), None);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions.hit(10, 6), None);
}

#[test]
fn click_on_rendered_entry_selects_campus() {
    let mut app = loaded_app((80, 24));
    let (_, regions) = draw(&app);
    app.record_layout(regions);

    let _ = app.handle(AppEvent::Mouse(MouseInput::left_release(5, 3)));

    assert_eq!(app.current_campus().map(|c| c.name.as_str()), Some("Keskusta"));
    let (buffer, _) = draw(&app);
    assert!(screen(&buffer).contains(ui::NO_DATA));
}

#[test]
fn footer_hints() {
    let (buffer, _) = draw(&loaded_app((80, 24)));
    let footer = row(&buffer, 23);

    assert!(footer.starts_with("q: quit"));
    assert!(footer.trim_end().ends_with("←/→: date"));
    assert!(footer.contains("↑/↓: campus    t: today"));
}
