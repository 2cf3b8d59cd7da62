//! Generation sessions.
//!
//! A [`Session`] is the handle for one generation run. It owns the generator, knows whether the run
//! is still active and can be aborted at any point. Dropping or replacing the session disposes of
//! the run; nothing about it outlives the handle.

use log::info;

use crate::{
    generator::{
        depth_first::DepthFirst, division::RecursiveDivision, Algorithm, Generator, Phase,
    },
    grid::{Grid, Position},
};

/// Parameters for a single generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Edge length of the drawing surface.
    pub size: u32,
    /// Number of cell rows.
    pub rows: usize,
    /// Number of cell columns.
    pub cols: usize,
    /// Seed for the random number generator.
    pub seed: u64,
    /// Whether recursive division leaves gaps in its wall lines.
    pub passages: bool,
}

/// Handle for one generation run.
pub struct Session {
    /// Algorithm driving the run.
    algorithm: Algorithm,
    /// Seed the run was started with.
    seed: u64,
    /// Generator owning the grid and the algorithm state.
    generator: Box<dyn Generator>,
    /// Whether the run was stopped before it finished.
    aborted: bool,
}

impl Session {
    /// Starts a new run with a fresh grid.
    ///
    /// # Panics
    ///
    /// Panics if either grid dimension in `options` is zero.
    pub fn start(algorithm: Algorithm, options: &RunOptions) -> Self {
        let generator: Box<dyn Generator> = match algorithm {
            Algorithm::DepthFirst => Box::new(DepthFirst::new(
                options.size,
                options.rows,
                options.cols,
                options.seed,
            )),
            Algorithm::Division => Box::new(RecursiveDivision::new(
                options.size,
                options.rows,
                options.cols,
                options.seed,
                options.passages,
            )),
        };
        info!(
            "starting {} run on a {}x{} grid with seed {}",
            algorithm.label(),
            options.cols,
            options.rows,
            options.seed
        );

        Self {
            algorithm,
            seed: options.seed,
            generator,
            aborted: false,
        }
    }

    /// Advances the run by one step.
    ///
    /// Returns `true` when the run is over, either because the maze is finished or because the
    /// session was aborted.
    pub fn step(&mut self) -> bool {
        if !self.is_active() {
            return true;
        }

        let done = self.generator.step();
        if done {
            info!(
                "{} run finished after {} steps",
                self.algorithm.label(),
                self.generator.steps()
            );
        }

        done
    }

    /// Runs the generator to completion in one go.
    pub fn finish(&mut self) {
        if self.is_active() {
            self.generator.run_to_completion();
            info!(
                "{} run completed instantly after {} steps",
                self.algorithm.label(),
                self.generator.steps()
            );
        }
    }

    /// Stops the run. The grid stays available in whatever state the run left it.
    pub fn abort(&mut self) {
        if self.is_active() {
            self.aborted = true;
            info!(
                "{} run aborted after {} steps",
                self.algorithm.label(),
                self.generator.steps()
            );
        }
    }

    /// Returns whether the run still has steps left to take.
    pub fn is_active(&self) -> bool {
        !self.aborted && self.generator.phase() != Phase::Done
    }

    /// Returns whether the run was aborted.
    pub const fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Returns the algorithm driving the run.
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the seed the run was started with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the phase of the underlying generator.
    pub fn phase(&self) -> Phase {
        self.generator.phase()
    }

    /// Returns the grid of the run.
    pub fn grid(&self) -> &Grid {
        self.generator.grid()
    }

    /// Returns the cell the generator is working on while the run is active.
    pub fn current(&self) -> Option<Position> {
        if self.is_active() {
            self.generator.current()
        } else {
            None
        }
    }

    /// Returns the number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.generator.steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates run options for a square grid.
    fn options(rows: usize, seed: u64) -> RunOptions {
        RunOptions {
            size: 500,
            rows,
            cols: rows,
            seed,
            passages: true,
        }
    }

    #[test]
    fn test_session_start_is_active() {
        let session = Session::start(Algorithm::DepthFirst, &options(4, 1));

        assert!(session.is_active());
        assert!(!session.is_aborted());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.algorithm(), Algorithm::DepthFirst);
        assert_eq!(session.seed(), 1);
        assert_eq!(session.current(), Some((0, 0)));
        assert_eq!(session.grid().rows(), 4);
    }

    #[test]
    fn test_session_becomes_inactive_when_done() {
        let mut session = Session::start(Algorithm::DepthFirst, &options(3, 2));

        let mut guard = 0;
        while !session.step() {
            guard += 1;
            assert!(guard < 100, "a 3x3 run should finish in under 100 steps");
        }

        assert!(!session.is_active());
        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(session.current(), None);
        assert!(session.step());
    }

    #[test]
    fn test_session_single_cell_releases_immediately() {
        let mut session = Session::start(Algorithm::DepthFirst, &options(1, 3));

        assert!(session.is_active());
        assert!(session.step());
        assert!(!session.is_active());
        assert_eq!(session.steps(), 0);
    }

    #[test]
    fn test_session_abort() {
        let mut session = Session::start(Algorithm::Division, &options(8, 4));
        assert!(!session.step());
        let steps = session.steps();
        let grid = session.grid().clone();

        session.abort();

        assert!(session.is_aborted());
        assert!(!session.is_active());
        assert!(session.step());
        assert_eq!(session.steps(), steps);
        assert_eq!(*session.grid(), grid);
        assert_ne!(session.phase(), Phase::Done);
    }

    #[test]
    fn test_session_abort_after_done_is_ignored() {
        let mut session = Session::start(Algorithm::DepthFirst, &options(2, 5));
        session.finish();

        session.abort();

        assert!(!session.is_aborted());
        assert_eq!(session.phase(), Phase::Done);
    }

    #[test]
    fn test_session_finish() {
        let mut session = Session::start(Algorithm::Division, &options(10, 6));
        session.finish();

        assert!(!session.is_active());
        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(session.grid().passage_count(), 99);
        assert_eq!(session.grid().reachable_from((0, 0)), 100);
    }

    #[test]
    fn test_session_sealed_division() {
        let mut session = Session::start(
            Algorithm::Division,
            &RunOptions {
                passages: false,
                ..options(2, 7)
            },
        );
        session.finish();

        assert_eq!(session.grid().passage_count(), 0);
    }
}
