//! Randomized depth-first carving.
//!
//! The generator starts from a fully walled grid and walks it like a depth-first search, knocking
//! down the wall towards a random unvisited neighbor on every forward move and popping its
//! explicit stack when it runs into a dead end. Once the stack is exhausted every cell has been
//! visited exactly once and the open walls form a spanning tree of the grid.

use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;

use super::{Generator, Phase};
use crate::grid::{Grid, Position};

/// Cell every carving run starts from.
const START: Position = (0, 0);

/// Depth-first maze generator.
pub struct DepthFirst {
    /// Grid being carved.
    grid: Grid,
    /// Cell the walk is standing on.
    current: Position,
    /// Cells to return to when the walk hits a dead end.
    stack: Vec<Position>,
    /// Source of the neighbor choices.
    rng: ChaCha8Rng,
    /// Lifecycle phase.
    phase: Phase,
    /// Number of carve and backtrack steps taken so far.
    steps: usize,
}

impl DepthFirst {
    /// Creates a generator over a fully walled `rows` by `cols` grid.
    ///
    /// The start cell is marked visited right away and becomes the current cell. The same `seed`
    /// always yields the same maze.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(size: u32, rows: usize, cols: usize, seed: u64) -> Self {
        let mut grid = Grid::new(size, rows, cols, true);
        grid.mark_visited(START);

        Self {
            grid,
            current: START,
            stack: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            phase: Phase::Idle,
            steps: 0,
        }
    }

    /// Returns the depth of the backtracking stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Generator for DepthFirst {
    fn step(&mut self) -> bool {
        if self.phase == Phase::Done {
            return true;
        }
        self.phase = Phase::Running;

        if let Some(next) = self
            .grid
            .pick_random_unvisited_neighbor(self.current, &mut self.rng)
        {
            self.grid.mark_visited(next);
            self.stack.push(self.current);
            self.grid.remove_wall_between(self.current, next);
            self.current = next;
        } else if let Some(previous) = self.stack.pop() {
            self.current = previous;
            self.steps += 1;
            if self.stack.is_empty() && self.grid.unvisited_neighbors(previous).is_empty() {
                self.phase = Phase::Done;
                return true;
            }
            return false;
        } else {
            self.phase = Phase::Done;
            return true;
        }

        self.steps += 1;
        false
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn current(&self) -> Option<Position> {
        Some(self.current)
    }

    fn steps(&self) -> usize {
        self.steps
    }
}
