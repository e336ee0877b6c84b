//! Fuzz target for the App state machine and layout
//!
//! Applies arbitrary event sequences and renders after every event at the
//! current terminal size, including degenerate sizes.
//!
//! # Invariants
//!
//! - Campus index always within the directory
//! - Rendering NEVER panics, at any size
//! - Loading and too-small frames expose no click regions
//! - Every region lies inside the terminal

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use ratatui::{backend::TestBackend, Terminal};
use unari_app::{App, AppEvent, MouseInput, RegionMap};
use unari_core::{CampusDirectory, FetchError};
use unari_tui::{ui, ColorSupport, Theme};

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Resize { cols: u8, rows: u8 },
    Prev,
    Next,
    Forward,
    Backward,
    Today,
    Click { x: u8, y: u8 },
    Loaded { ok: bool },
}

fuzz_target!(|ops: Vec<Op>| {
    let Some(today) = NaiveDate::from_ymd_opt(2025, 6, 2) else {
        return;
    };
    let mut app = App::new(Arc::new(CampusDirectory::helsinki()), today, (80, 24));
    let theme = Theme::for_colors(ColorSupport::Ansi256);

    for op in ops.into_iter().take(64) {
        let event = match op {
            Op::Resize { cols, rows } => AppEvent::Resize(u16::from(cols), u16::from(rows)),
            Op::Prev => AppEvent::NavigatePrev,
            Op::Next => AppEvent::NavigateNext,
            Op::Forward => AppEvent::DateForward,
            Op::Backward => AppEvent::DateBackward,
            Op::Today => AppEvent::JumpToday { today },
            Op::Click { x, y } => AppEvent::Mouse(MouseInput::left_release(u16::from(x), u16::from(y))),
            Op::Loaded { ok: true } => AppEvent::DataLoaded(Ok(vec![])),
            Op::Loaded { ok: false } => AppEvent::DataLoaded(Err(FetchError::Status(500))),
        };
        let _ = app.handle(event);
        assert!(app.campus_index() < app.campuses().len());

        let (cols, rows) = app.terminal_size();
        let Ok(mut terminal) = Terminal::new(TestBackend::new(cols, rows)) else {
            return;
        };
        let mut regions = RegionMap::new();
        if terminal.draw(|frame| regions = ui::render(frame, &app, &theme)).is_err() {
            return;
        }

        if app.is_loading() || cols < ui::MIN_WIDTH || rows < ui::MIN_HEIGHT {
            assert!(regions.is_empty());
        }
        for (_, region) in regions.iter() {
            assert!(u32::from(region.x) + u32::from(region.width) <= u32::from(cols));
            assert!(u32::from(region.y) + u32::from(region.height) <= u32::from(rows));
        }
        app.record_layout(regions);
    }
});
