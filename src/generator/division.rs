//! Recursive chamber division.
//!
//! Division works on the complementary representation to carving: cells start with no walls and
//! the generator adds them. The outer border is sealed up front, then every step takes one pending
//! chamber, draws a full horizontal and a full vertical wall line through it at random positions and
//! queues the four resulting quadrants. Chambers one cell wide or tall are never split.
//!
//! Unless the generator is sealed, each split leaves a single gap in three of the four wall arms
//! around the crossing. Every quadrant is then joined to the others exactly once, which keeps the
//! finished maze a spanning tree. A sealed generator adds every wall line in full and may leave
//! regions cut off from each other.

use std::ops::Range;

use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

use super::{Generator, Phase};
use crate::grid::{Grid, Position};

/// Rectangular region of the grid awaiting division.
///
/// Bounds are half-open: the chamber covers columns `col_start..col_end` and rows
/// `row_start..row_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chamber {
    /// First column inside the chamber.
    pub col_start: usize,
    /// First column past the chamber.
    pub col_end: usize,
    /// First row inside the chamber.
    pub row_start: usize,
    /// First row past the chamber.
    pub row_end: usize,
}

impl Chamber {
    /// Creates a chamber covering `cols` by `rows`.
    pub const fn new(cols: Range<usize>, rows: Range<usize>) -> Self {
        Self {
            col_start: cols.start,
            col_end: cols.end,
            row_start: rows.start,
            row_end: rows.end,
        }
    }

    /// Returns the width of the chamber in cells.
    pub const fn width(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    /// Returns the height of the chamber in cells.
    pub const fn height(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    /// Returns whether the chamber is too thin to be split any further.
    pub const fn is_terminal(&self) -> bool {
        self.width() <= 1 || self.height() <= 1
    }

    /// Returns the four chambers left by splitting at the given column and row boundaries.
    ///
    /// The quadrants come in the order top-left, top-right, bottom-left, bottom-right.
    pub const fn quadrants(&self, col_split: usize, row_split: usize) -> [Self; 4] {
        [
            Self::new(self.col_start..col_split, self.row_start..row_split),
            Self::new(col_split..self.col_end, self.row_start..row_split),
            Self::new(self.col_start..col_split, row_split..self.row_end),
            Self::new(col_split..self.col_end, row_split..self.row_end),
        ]
    }
}

/// Record of a single split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    /// Chamber that was split.
    pub chamber: Chamber,
    /// Column boundary of the vertical wall; the wall runs between `col_split - 1` and
    /// `col_split`.
    pub col_split: usize,
    /// Row boundary of the horizontal wall; the wall runs between `row_split - 1` and
    /// `row_split`.
    pub row_split: usize,
}

impl Split {
    /// Returns the cell sitting at the top-left of the wall crossing.
    pub const fn crossing(&self) -> Position {
        (self.col_split - 1, self.row_split - 1)
    }
}

/// Recursive division maze generator.
pub struct RecursiveDivision {
    /// Grid walls are added to.
    grid: Grid,
    /// Chambers waiting to be split, processed last in first out.
    pending: Vec<Chamber>,
    /// Source of the split positions and gaps.
    rng: ChaCha8Rng,
    /// Whether gaps are left in the wall lines.
    passages: bool,
    /// Lifecycle phase.
    phase: Phase,
    /// Number of splits performed so far.
    steps: usize,
    /// Most recent split.
    last_split: Option<Split>,
}

impl RecursiveDivision {
    /// Creates a generator over an open `rows` by `cols` grid with a sealed border.
    ///
    /// With `passages` set, every split leaves gaps so the finished maze stays connected.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(size: u32, rows: usize, cols: usize, seed: u64, passages: bool) -> Self {
        let mut grid = Grid::new(size, rows, cols, false);
        grid.seal_border();

        let whole = Chamber::new(0..cols, 0..rows);
        let pending = if whole.is_terminal() {
            Vec::new()
        } else {
            vec![whole]
        };

        Self {
            grid,
            pending,
            rng: ChaCha8Rng::seed_from_u64(seed),
            passages,
            phase: Phase::Idle,
            steps: 0,
            last_split: None,
        }
    }

    /// Returns the chambers still waiting to be split.
    pub fn pending(&self) -> &[Chamber] {
        &self.pending
    }

    /// Returns the most recent split, if any.
    pub const fn last_split(&self) -> Option<Split> {
        self.last_split
    }

    /// Splits `chamber` into four quadrants, adding both wall lines to the grid.
    fn split(&mut self, chamber: Chamber) -> Split {
        let col_split = self
            .rng
            .gen_range(chamber.col_start + 1..chamber.col_end);
        let row_split = self
            .rng
            .gen_range(chamber.row_start + 1..chamber.row_end);

        let passages = self.passages;
        let solid_arm = self.rng.gen_range(0..4_usize);
        let rng = &mut self.rng;
        let mut gap_in = |arm: usize, span: Range<usize>| {
            (passages && arm != solid_arm).then(|| rng.gen_range(span))
        };
        let west_gap = gap_in(0, chamber.col_start..col_split);
        let east_gap = gap_in(1, col_split..chamber.col_end);
        let north_gap = gap_in(2, chamber.row_start..row_split);
        let south_gap = gap_in(3, row_split..chamber.row_end);

        for col in chamber.col_start..chamber.col_end {
            if Some(col) == west_gap || Some(col) == east_gap {
                continue;
            }
            self.grid
                .add_wall_between((col, row_split - 1), (col, row_split));
        }
        for row in chamber.row_start..chamber.row_end {
            if Some(row) == north_gap || Some(row) == south_gap {
                continue;
            }
            self.grid
                .add_wall_between((col_split - 1, row), (col_split, row));
        }

        Split {
            chamber,
            col_split,
            row_split,
        }
    }
}

impl Generator for RecursiveDivision {
    fn step(&mut self) -> bool {
        if self.phase == Phase::Done {
            return true;
        }
        self.phase = Phase::Running;

        let Some(chamber) = self.pending.pop() else {
            self.phase = Phase::Done;
            self.last_split = None;
            return true;
        };

        let split = self.split(chamber);
        // Reversed so the top-left quadrant is split next.
        for quadrant in chamber
            .quadrants(split.col_split, split.row_split)
            .into_iter()
            .rev()
        {
            if !quadrant.is_terminal() {
                self.pending.push(quadrant);
            }
        }

        self.last_split = Some(split);
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
        self.last_split.as_ref().map(Split::crossing)
    }

    fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::grid::Side;

    /// Asserts that every boundary cell keeps its outward-facing walls.
    fn assert_sealed_border(grid: &Grid) {
        let (last_col, last_row) = grid.goal();

        for cell in grid.cells() {
            let (col, row) = cell.position();
            if row == 0 {
                assert!(cell.has_wall(Side::Top), "{col},{row} should have a top wall");
            }
            if row == last_row {
                assert!(cell.has_wall(Side::Bottom), "{col},{row} should have a bottom wall");
            }
            if col == 0 {
                assert!(cell.has_wall(Side::Left), "{col},{row} should have a left wall");
            }
            if col == last_col {
                assert!(cell.has_wall(Side::Right), "{col},{row} should have a right wall");
            }
        }
    }

    #[test]
    fn test_chamber_dimensions() {
        let chamber = Chamber::new(2..7, 1..4);

        assert_eq!(chamber.width(), 5);
        assert_eq!(chamber.height(), 3);
        assert!(!chamber.is_terminal());
        assert!(Chamber::new(0..1, 0..10).is_terminal());
        assert!(Chamber::new(0..10, 3..4).is_terminal());
    }

    #[test]
    fn test_chamber_quadrants() {
        let chamber = Chamber::new(0..6, 0..4);

        assert_eq!(
            chamber.quadrants(2, 3),
            [
                Chamber::new(0..2, 0..3),
                Chamber::new(2..6, 0..3),
                Chamber::new(0..2, 3..4),
                Chamber::new(2..6, 3..4),
            ]
        );
    }

    #[test]
    fn test_division_initial_state() {
        let generator = RecursiveDivision::new(500, 5, 5, 1, true);

        assert_eq!(generator.phase(), Phase::Idle);
        assert_eq!(generator.pending(), &[Chamber::new(0..5, 0..5)]);
        assert_eq!(generator.current(), None);
        assert_sealed_border(generator.grid());
        assert_eq!(generator.grid().passage_count(), 40);
    }

    #[test]
    fn test_division_single_cell_finishes_immediately() {
        let mut generator = RecursiveDivision::new(500, 1, 1, 1, true);

        assert!(generator.pending().is_empty());
        assert!(generator.step());
        assert_eq!(generator.phase(), Phase::Done);
        assert_eq!(generator.steps(), 0);
        assert_sealed_border(generator.grid());
    }

    #[test]
    fn test_division_corridor_is_never_split() {
        let mut generator = RecursiveDivision::new(500, 1, 6, 4, true);

        assert!(generator.step());
        assert_eq!(generator.grid().passage_count(), 5);
    }

    #[test]
    fn test_division_split_stays_inside_chamber() {
        let mut generator = RecursiveDivision::new(500, 12, 12, 99, true);

        while !generator.step() {
            let split = generator.last_split().expect("a split should be recorded");
            let chamber = split.chamber;
            assert!(chamber.col_start < split.col_split && split.col_split < chamber.col_end);
            assert!(chamber.row_start < split.row_split && split.row_split < chamber.row_end);
            assert_eq!(generator.current(), Some(split.crossing()));
        }
        assert!(generator.pending().is_empty());
    }

    #[test]
    fn test_division_sealed_two_by_two_closes_every_cell() {
        let mut generator = RecursiveDivision::new(500, 2, 2, 6, false);

        assert!(!generator.step());
        assert!(generator.step());
        assert_eq!(generator.steps(), 1);
        assert_eq!(generator.grid().passage_count(), 0);
        assert!(generator
            .grid()
            .cells()
            .iter()
            .all(|cell| cell.walls() == crate::grid::Walls::CLOSED));
    }

    #[test]
    fn test_division_with_passages_two_by_two() {
        let mut generator = RecursiveDivision::new(500, 2, 2, 6, true);
        generator.run_to_completion();

        assert_eq!(generator.grid().passage_count(), 3);
        assert_eq!(generator.grid().reachable_from((0, 0)), 4);
        assert_sealed_border(generator.grid());
    }

    #[test]
    fn test_division_sealed_adds_full_lines() {
        let mut generator = RecursiveDivision::new(500, 6, 6, 13, false);
        assert!(!generator.step());
        let split = generator.last_split().expect("a split should be recorded");

        for col in 0..6 {
            assert_eq!(
                generator
                    .grid()
                    .has_wall_between((col, split.row_split - 1), (col, split.row_split)),
                Some(true)
            );
        }
        for row in 0..6 {
            assert_eq!(
                generator
                    .grid()
                    .has_wall_between((split.col_split - 1, row), (split.col_split, row)),
                Some(true)
            );
        }
    }

    #[test]
    fn test_division_is_reproducible() {
        let mut first = RecursiveDivision::new(500, 9, 9, 5, true);
        let mut second = RecursiveDivision::new(500, 9, 9, 5, true);
        first.run_to_completion();
        second.run_to_completion();

        assert_eq!(first.grid(), second.grid());
    }

    proptest! {
        #[test]
        fn test_division_with_passages_spans_the_grid(
            rows in 1_usize..12,
            cols in 1_usize..12,
            seed in any::<u64>()
        ) {
            let mut generator = RecursiveDivision::new(500, rows, cols, seed, true);
            generator.run_to_completion();
            let grid = generator.grid();
            let cells = rows * cols;

            prop_assert_eq!(generator.phase(), Phase::Done);
            prop_assert_eq!(grid.passage_count(), cells - 1);
            prop_assert_eq!(grid.reachable_from((0, 0)), cells);
        }

        #[test]
        fn test_division_sealed_keeps_border(
            rows in 1_usize..12,
            cols in 1_usize..12,
            seed in any::<u64>()
        ) {
            let mut generator = RecursiveDivision::new(500, rows, cols, seed, false);
            generator.run_to_completion();

            assert_sealed_border(generator.grid());
            prop_assert!(generator.pending().is_empty());
        }
    }
}
