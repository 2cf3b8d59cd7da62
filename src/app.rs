//! Core application state and logic for the maze animator.

use color_eyre::eyre::Result;
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    animation::Animator,
    config::Config,
    events,
    generator::Algorithm,
    grid::Grid,
    session::{RunOptions, Session},
    ui,
};

/// Application state container for the maze animator.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui renders the maze and Crossterm events write to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Configuration the application was launched with.
    pub(crate) config: Config,
    /// Handle of the current or most recent generation run.
    ///
    /// This field is `None` until the first run starts. Starting a new run replaces the handle,
    /// which disposes of the previous run.
    pub(crate) session: Option<Session>,
    /// Fully walled grid shown before the first run.
    pub(crate) idle_grid: Grid,
    /// Frame pacing for the active run.
    pub(crate) animator: Animator,
    /// Edge length of the drawing surface.
    ///
    /// This field holds the surface edge computed from the canvas area during the last redraw of
    /// the on-screen frame. New runs size their grid with it.
    pub(crate) surface: u32,
    /// Algorithm to start once the first frame has been drawn.
    pub(crate) autostart: Option<Algorithm>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    /// Creates a new instance of the App structure from the parsed configuration.
    pub fn new(config: Config) -> Self {
        let surface = ui::MAX_SURFACE;

        Self {
            exit: false,
            idle_grid: Grid::new(surface, config.rows(), config.cols(), true),
            animator: Animator::new(config.frame_delay()),
            session: None,
            surface,
            autostart: config.algorithm,
            config,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws a frame, handles user input and lets the animator advance the active run
    /// by at most one step. The loop continues until the exit condition is `true`, after which the
    /// function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        info!("launching with {:?}", self.config);

        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            if let Some(algorithm) = self.autostart.take() {
                let _ = self.start(algorithm);
            }
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Starts a new generation run unless one is already in progress.
    ///
    /// Returns whether the run was started.
    pub(crate) fn start(&mut self, algorithm: Algorithm) -> bool {
        if self.is_running() {
            info!(
                "ignoring {} request while a run is in progress",
                algorithm.label()
            );
            return false;
        }

        let options = self.run_options();
        self.session = Some(Session::start(algorithm, &options));
        self.animator.reset();

        true
    }

    /// Aborts the active run, if any.
    pub(crate) fn abort(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.abort();
        }
    }

    /// Completes the active run instantly, if any.
    pub(crate) fn finish(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.finish();
        }
    }

    /// Lets the animator advance the active run by one step if a frame is due.
    ///
    /// Returns whether a step was taken.
    pub(crate) fn advance(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| self.animator.tick(session).stepped())
    }

    /// Returns whether a run is in progress.
    pub(crate) fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_active)
    }

    /// Returns the grid to display: the one of the latest run, or the idle grid before any run.
    pub(crate) fn grid(&self) -> &Grid {
        self.session.as_ref().map_or(&self.idle_grid, Session::grid)
    }

    /// Builds the options for the next run from the configuration and the current surface.
    fn run_options(&self) -> RunOptions {
        RunOptions {
            size: self.surface,
            rows: self.config.rows(),
            cols: self.config.cols(),
            seed: self.config.seed.unwrap_or_else(rand::random),
            passages: !self.config.sealed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::generator::Phase;

    /// Creates an app with a fixed seed and no frame delay.
    fn create_test_app(rows: u16) -> App {
        App::new(Config {
            rows,
            seed: Some(9),
            frame_delay_ms: 0,
            ..Config::default()
        })
    }

    #[test]
    fn test_app_new_shows_walled_idle_grid() {
        let app = create_test_app(5);

        assert!(!app.exit);
        assert!(app.session.is_none());
        assert!(!app.is_running());
        assert_eq!(app.grid().rows(), 5);
        assert_eq!(app.grid().passage_count(), 0);
        assert_eq!(app.animator.frame_delay(), Duration::ZERO);
    }

    #[test]
    fn test_app_autostart_from_config() {
        let app = App::new(Config {
            algorithm: Some(Algorithm::Division),
            ..Config::default()
        });

        assert_eq!(app.autostart, Some(Algorithm::Division));
    }

    #[test]
    fn test_app_start_uses_config_and_surface() {
        let mut app = create_test_app(7);
        app.surface = 300;

        assert!(app.start(Algorithm::DepthFirst));

        let session = app.session.as_ref().expect("session should exist");
        assert_eq!(session.seed(), 9);
        assert_eq!(session.grid().size(), 300);
        assert_eq!(session.grid().cols(), 7);
        assert!(app.is_running());
    }

    #[test]
    fn test_app_start_ignored_while_running() {
        let mut app = create_test_app(5);
        assert!(app.start(Algorithm::DepthFirst));
        assert!(app.advance());

        assert!(!app.start(Algorithm::Division));

        let session = app.session.as_ref().expect("session should exist");
        assert_eq!(session.algorithm(), Algorithm::DepthFirst);
        assert_eq!(session.steps(), 1);
    }

    #[test]
    fn test_app_guard_releases_when_run_is_done() {
        let mut app = create_test_app(3);
        assert!(app.start(Algorithm::DepthFirst));

        while app.advance() {}

        assert!(!app.is_running());
        assert_eq!(app.grid().passage_count(), 8);
        assert!(app.start(Algorithm::Division));
        assert_eq!(
            app.session.as_ref().map(Session::algorithm),
            Some(Algorithm::Division)
        );
    }

    #[test]
    fn test_app_abort_releases_guard() {
        let mut app = create_test_app(6);
        assert!(app.start(Algorithm::Division));
        assert!(app.advance());

        app.abort();

        assert!(!app.is_running());
        assert!(!app.advance());
        assert!(app.start(Algorithm::DepthFirst));
    }

    #[test]
    fn test_app_finish() {
        let mut app = create_test_app(6);
        assert!(app.start(Algorithm::DepthFirst));

        app.finish();

        assert!(!app.is_running());
        assert_eq!(
            app.session.as_ref().map(Session::phase),
            Some(Phase::Done)
        );
        assert_eq!(app.grid().passage_count(), 35);
    }

    #[test]
    fn test_app_sealed_config_disables_passages() {
        let mut app = App::new(Config {
            rows: 2,
            sealed: true,
            ..Config::default()
        });
        assert!(app.start(Algorithm::Division));

        app.finish();

        assert_eq!(app.grid().passage_count(), 0);
    }

    #[test]
    fn test_app_advance_without_session() {
        let mut app = create_test_app(4);

        assert!(!app.advance());
    }
}
