//! Application state machine.
//!
//! This module defines the [`App`] state machine, which holds one session's
//! view state completely decoupled from I/O and the transport.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks the selected campus and the selected calendar day.
//! - Stores terminal dimensions to handle resize events.
//! - Owns the session's [`MenuIndex`] and the loading flag.
//! - Keeps the region map of the last render for pointer hit-testing.

use std::sync::Arc;

use chrono::NaiveDate;
use unari_core::{Campus, CampusDirectory, FetchError, MenuIndex, MenuRecord, MenuSection};

use crate::{AppAction, AppEvent, MouseInput, RegionMap};

/// Logical phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the menu fetch.
    Initializing,
    /// Menu data (or its absence) is known; events are interactive.
    Interactive,
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Campus directory shared with every other session.
    campuses: Arc<CampusDirectory>,
    /// Selected campus. Always `< campuses.len()`.
    campus_index: usize,
    /// Day whose menus are shown.
    selected_date: NaiveDate,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// `true` until the first `DataLoaded`.
    loading: bool,
    /// `false` if the last fetch failed.
    data_available: bool,
    /// Menus of this session.
    menu: MenuIndex,
    /// Hit-test regions from the most recent render.
    regions: RegionMap,
}

impl App {
    /// Create the state of a new session on the directory's default campus.
    pub fn new(campuses: Arc<CampusDirectory>, today: NaiveDate, terminal_size: (u16, u16)) -> Self {
        let campus_index = campuses.default_index();
        Self {
            campuses,
            campus_index,
            selected_date: today,
            terminal_size,
            loading: true,
            data_available: true,
            menu: MenuIndex::empty(),
            regions: RegionMap::new(),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::NavigatePrev => {
                let count = self.campuses.len();
                self.campus_index = (self.campus_index + count - 1) % count;
                vec![AppAction::Render]
            },
            AppEvent::NavigateNext => {
                self.campus_index = (self.campus_index + 1) % self.campuses.len();
                vec![AppAction::Render]
            },
            AppEvent::DateForward => {
                self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
                vec![AppAction::Render]
            },
            AppEvent::DateBackward => {
                self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
                vec![AppAction::Render]
            },
            AppEvent::JumpToday { today } => {
                self.selected_date = today;
                vec![AppAction::Render]
            },
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::DataLoaded(fetched) => {
                self.load_menu(fetched);
                vec![AppAction::Render]
            },
            AppEvent::Quit => vec![AppAction::Quit],
        }
    }

    /// Select the campus under a primary-button release.
    fn handle_mouse(&mut self, mouse: MouseInput) -> Vec<AppAction> {
        if !mouse.is_primary_release() {
            return vec![];
        }

        let Some(index) = self.regions.hit(mouse.x, mouse.y).and_then(|n| self.campuses.position(n))
        else {
            return vec![];
        };

        if index == self.campus_index {
            return vec![];
        }

        self.campus_index = index;
        vec![AppAction::Render]
    }

    /// Replace the menu index with the outcome of a fetch.
    fn load_menu(&mut self, fetched: Result<Vec<MenuRecord>, FetchError>) {
        self.loading = false;
        match MenuIndex::build(&self.campuses, fetched) {
            Ok(index) => {
                self.menu = index;
                self.data_available = true;
            },
            Err(err) => {
                tracing::warn!(error = %err, "menu fetch failed, continuing with empty index");
                self.menu = MenuIndex::empty();
                self.data_available = false;
            },
        }
    }

    /// Store the region map produced by the latest render.
    pub fn record_layout(&mut self, regions: RegionMap) {
        self.regions = regions;
    }

    /// All campuses in display order.
    pub fn campuses(&self) -> &CampusDirectory {
        &self.campuses
    }

    /// Index of the selected campus.
    pub fn campus_index(&self) -> usize {
        self.campus_index
    }

    /// The selected campus.
    pub fn current_campus(&self) -> Option<&Campus> {
        self.campuses.get(self.campus_index)
    }

    /// Day whose menus are shown.
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// `true` until menu data has been received.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// `false` if the last fetch failed.
    pub fn data_available(&self) -> bool {
        self.data_available
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        if self.loading { SessionPhase::Initializing } else { SessionPhase::Interactive }
    }

    /// Menus of the selected campus on the selected day.
    pub fn visible_menu(&self) -> Vec<MenuSection<'_>> {
        self.current_campus()
            .map(|campus| self.menu.lookup(&campus.name, self.selected_date))
            .unwrap_or_default()
    }

    /// The session's menu index.
    pub fn menu(&self) -> &MenuIndex {
        &self.menu
    }

    /// Regions of the most recent render.
    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }
}
