//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use unari_app::{App, AppEvent, MouseButton, MouseInput, MouseKind, Region, RegionMap};
use unari_core::{CampusDirectory, FetchError};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default()
}

fn new_app() -> App {
    App::new(Arc::new(CampusDirectory::helsinki()), start_date(), (80, 24))
}

fn mouse_strategy() -> impl Strategy<Value = MouseInput> {
    let button = prop_oneof![
        Just(MouseButton::Left),
        Just(MouseButton::Right),
        Just(MouseButton::Middle),
        Just(MouseButton::WheelUp),
    ];
    let kind = prop_oneof![Just(MouseKind::Press), Just(MouseKind::Release), Just(MouseKind::Drag)];
    (0u16..60, 0u16..40, button, kind).prop_map(|(x, y, button, kind)| MouseInput {
        x,
        y,
        button,
        kind,
    })
}

/// Generate random app events, excluding `Quit`.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        1 => (0u16..200, 0u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        3 => Just(AppEvent::NavigatePrev),
        3 => Just(AppEvent::NavigateNext),
        2 => Just(AppEvent::DateForward),
        2 => Just(AppEvent::DateBackward),
        1 => Just(AppEvent::JumpToday { today: start_date() }),
        2 => mouse_strategy().prop_map(AppEvent::Mouse),
        1 => Just(AppEvent::DataLoaded(Ok(vec![]))),
        1 => Just(AppEvent::DataLoaded(Err(FetchError::Status(500)))),
    ]
}

/// Sidebar-like layout: one 3-row entry per campus, one row apart.
fn sidebar_regions(app: &App) -> RegionMap {
    let mut regions = RegionMap::new();
    for (i, campus) in app.campuses().campuses().iter().enumerate() {
        regions.insert(campus.name.clone(), Region::new(3, 2 + 4 * i as u16, 16, 3));
    }
    regions
}

proptest! {
    #[test]
    fn prop_campus_index_stays_in_range(events in prop::collection::vec(event_strategy(), 0..80)) {
        let mut app = new_app();
        let count = app.campuses().len();
        app.record_layout(sidebar_regions(&app));

        for event in events {
            let _ = app.handle(event);
            prop_assert!(app.campus_index() < count);
        }
    }

    #[test]
    fn prop_prev_next_wrap_modulo_count(steps in prop::collection::vec(any::<bool>(), 0..60)) {
        let mut app = new_app();
        let count = app.campuses().len() as i64;
        let mut expected = app.campus_index() as i64;

        for forward in steps {
            if forward {
                let _ = app.handle(AppEvent::NavigateNext);
                expected += 1;
            } else {
                let _ = app.handle(AppEvent::NavigatePrev);
                expected -= 1;
            }
            prop_assert_eq!(app.campus_index() as i64, expected.rem_euclid(count));
        }
    }

    #[test]
    fn prop_date_forward_backward_round_trip(offset in -400i64..400) {
        let mut app = new_app();
        for _ in 0..offset.unsigned_abs() {
            let step = if offset > 0 { AppEvent::DateForward } else { AppEvent::DateBackward };
            let _ = app.handle(step);
        }
        let before = app.selected_date();

        let _ = app.handle(AppEvent::DateForward);
        let _ = app.handle(AppEvent::DateBackward);

        prop_assert_eq!(app.selected_date(), before);
    }

    #[test]
    fn prop_loading_clears_only_on_data_loaded(events in prop::collection::vec(event_strategy(), 0..40)) {
        let mut app = new_app();
        let mut seen_data = false;

        for event in events {
            seen_data |= matches!(event, AppEvent::DataLoaded(_));
            let _ = app.handle(event);
            prop_assert_eq!(app.is_loading(), !seen_data);
        }
    }
}

#[test]
fn prev_from_first_campus_selects_last() {
    let mut app = new_app();
    while app.campus_index() != 0 {
        let _ = app.handle(AppEvent::NavigatePrev);
    }

    let _ = app.handle(AppEvent::NavigatePrev);

    assert_eq!(app.campus_index(), app.campuses().len() - 1);
}
