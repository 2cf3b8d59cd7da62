//! Maze generation algorithms.
//!
//! Every algorithm implements [`Generator`], a step-and-continue contract: the caller owns the
//! loop, calls [`Generator::step`] once per display frame and stops when it reports completion.
//! Generators keep all of their state (current cell, backtracking stack, pending chambers, random
//! number generator) to themselves.

pub mod depth_first;
pub mod division;

use clap::ValueEnum;

use crate::grid::{Grid, Position};

/// Lifecycle of a generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created but not stepped yet.
    Idle,
    /// At least one step has run and the maze is not finished.
    Running,
    /// The maze is finished; further steps do nothing.
    Done,
}

impl Phase {
    /// Returns the lowercase name shown in the status line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

/// Available maze generation algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Randomized depth-first carving with an explicit backtracking stack.
    #[value(name = "dfs")]
    DepthFirst,
    /// Recursive chamber division that adds walls to an open grid.
    Division,
}

impl Algorithm {
    /// Returns the human readable name of the algorithm.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DepthFirst => "Depth-first search",
            Self::Division => "Recursive division",
        }
    }
}

/// Incremental maze generator driven one step at a time.
pub trait Generator {
    /// Runs a single generation step.
    ///
    /// Returns `true` once the generator has reached [`Phase::Done`]. Calling it again afterwards
    /// is a no-op that keeps returning `true`.
    fn step(&mut self) -> bool;

    /// Returns the lifecycle phase of the generator.
    fn phase(&self) -> Phase;

    /// Returns the grid being generated.
    fn grid(&self) -> &Grid;

    /// Returns the cell the generator is working on, if any.
    fn current(&self) -> Option<Position>;

    /// Returns the number of steps that changed the generator state.
    fn steps(&self) -> usize;

    /// Steps the generator until it is done.
    fn run_to_completion(&mut self) {
        while !self.step() {}
    }
}
