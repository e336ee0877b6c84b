//! Generic session loop.
//!
//! The Runtime drives one connection, coordinating between:
//! - [`App`]: view state machine
//! - [`Driver`]: terminal I/O
//! - [`MenuSource`]: the menu fetch, raced against input so the session is
//!   interactive (resize, quit) while data is still loading

use std::sync::Arc;

use unari_core::{CampusDirectory, Environment, MenuSource};

use crate::{App, AppAction, AppEvent, Driver, SessionPhase, TerminalInput};

/// Generic runtime that orchestrates App, Driver and the menu fetch.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment providing "today"
/// - `S`: Upstream menu source
pub struct Runtime<D, E, S>
where
    D: Driver,
    E: Environment,
    S: MenuSource,
{
    driver: D,
    env: E,
    source: Arc<S>,
    app: App,
}

impl<D, E, S> Runtime<D, E, S>
where
    D: Driver,
    E: Environment,
    S: MenuSource,
{
    /// Create a session on the directory's default campus, showing today.
    pub fn new(
        driver: D,
        env: E,
        source: Arc<S>,
        campuses: Arc<CampusDirectory>,
        terminal_size: (u16, u16),
    ) -> Self {
        let app = App::new(campuses, env.today(), terminal_size);
        Self { driver, env, source, app }
    }

    /// Run the session until quit, disconnect or shutdown.
    ///
    /// This is the core loop that:
    /// 1. Renders the loading frame
    /// 2. Races the menu fetch against terminal input
    /// 3. Applies each event to the App and re-renders
    ///
    /// The terminal is restored on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.event_loop().await;
        self.driver.stop();
        result
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        self.driver.start()?;
        self.render()?;

        let source = Arc::clone(&self.source);
        let fetch = async move { source.fetch().await };
        tokio::pin!(fetch);
        let mut fetch_pending = true;

        loop {
            let event = tokio::select! {
                fetched = &mut fetch, if fetch_pending => {
                    fetch_pending = false;
                    Some(AppEvent::DataLoaded(fetched))
                },
                polled = self.driver.poll_event() => match polled? {
                    Some(input) => self.translate(input),
                    None => {
                        tracing::debug!("session input closed");
                        return Ok(());
                    },
                },
            };

            if let Some(event) = event
                && self.dispatch(event)?
            {
                return Ok(());
            }
        }
    }

    /// Apply key bindings to raw input.
    fn translate(&self, input: TerminalInput) -> Option<AppEvent> {
        match input {
            TerminalInput::Key(key) => AppEvent::from_key(key, || self.env.today()),
            TerminalInput::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
            TerminalInput::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
        }
    }

    /// Apply one event and execute the resulting actions.
    ///
    /// Returns `true` if the session should end.
    fn dispatch(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let phase = self.app.phase();
        let actions = self.app.handle(event);

        if phase == SessionPhase::Initializing && self.app.phase() == SessionPhase::Interactive {
            tracing::debug!(data_available = self.app.data_available(), "session interactive");
        }

        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    fn render(&mut self) -> Result<(), D::Error> {
        let regions = self.driver.render(&self.app)?;
        self.app.record_layout(regions);
        Ok(())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }
}
