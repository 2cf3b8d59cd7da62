//! Grid and cell data model.
//!
//! This module contains the [`Grid`] that owns every [`Cell`] of a maze, along with the wall
//! bookkeeping shared by all generators. Walls between adjacent cells are stored on both cells and
//! are always mutated in pairs, so that the two flags describing one logical wall never disagree.

use std::collections::VecDeque;

use rand::{seq::SliceRandom as _, Rng};

/// Cell coordinates as `(col, row)`.
///
/// The column grows to the right and the row grows downwards, with `(0, 0)` being the top-left
/// cell of the grid.
pub type Position = (usize, usize);

/// One of the four sides of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Side facing the previous row.
    Top,
    /// Side facing the next column.
    Right,
    /// Side facing the next row.
    Bottom,
    /// Side facing the previous column.
    Left,
}

impl Side {
    /// Every side, in the order up, right, down, left.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Returns the side an adjacent cell uses for the same logical wall.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns the side of `from` that faces `to`.
    ///
    /// The two positions must differ by exactly one step along a single axis. Any other offset,
    /// including identical positions and diagonals, yields `None`.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let (from_col, from_row) = from;
        let (to_col, to_row) = to;

        if from_row == to_row {
            if from_col.checked_add(1) == Some(to_col) {
                return Some(Self::Right);
            }
            if to_col.checked_add(1) == Some(from_col) {
                return Some(Self::Left);
            }
        } else if from_col == to_col {
            if from_row.checked_add(1) == Some(to_row) {
                return Some(Self::Bottom);
            }
            if to_row.checked_add(1) == Some(from_row) {
                return Some(Self::Top);
            }
        }

        None
    }
}

/// Wall flags of a single cell.
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag is an independent wall; a cell has exactly four of them."
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Walls {
    /// Wall shared with the cell above.
    pub top: bool,
    /// Wall shared with the cell to the right.
    pub right: bool,
    /// Wall shared with the cell below.
    pub bottom: bool,
    /// Wall shared with the cell to the left.
    pub left: bool,
}

impl Walls {
    /// All four walls present.
    pub const CLOSED: Self = Self {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };
    /// No walls at all.
    pub const OPEN: Self = Self {
        top: false,
        right: false,
        bottom: false,
        left: false,
    };

    /// Returns whether the wall on `side` is present.
    pub const fn get(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Sets the wall on `side` to `present`.
    pub fn set(&mut self, side: Side, present: bool) {
        match side {
            Side::Top => self.top = present,
            Side::Right => self.right = present,
            Side::Bottom => self.bottom = present,
            Side::Left => self.left = present,
        }
    }
}

/// A single grid unit with four wall flags and a visited flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Column of the cell.
    col: usize,
    /// Row of the cell.
    row: usize,
    /// Walls around the cell.
    walls: Walls,
    /// Whether a generator has already reached this cell.
    visited: bool,
}

impl Cell {
    /// Returns the position of the cell within its grid.
    pub const fn position(&self) -> Position {
        (self.col, self.row)
    }

    /// Returns the wall flags of the cell.
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Returns whether the wall on `side` is present.
    pub const fn has_wall(&self, side: Side) -> bool {
        self.walls.get(side)
    }

    /// Returns whether a generator has already reached this cell.
    pub const fn is_visited(&self) -> bool {
        self.visited
    }
}

/// Row-major matrix of cells drawn onto a square surface.
///
/// The grid owns every cell of one generation run. It is created once per run and replaced when a
/// new run starts; nothing carries over between runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Edge length of the drawing surface in logical units.
    size: u32,
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Cells stored row by row.
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a `rows` by `cols` grid drawn onto a surface of edge length `size`.
    ///
    /// Every cell starts with all four walls when `walls` is `true`, which is what carving
    /// generators expect, and with no walls otherwise, which is what dividing generators expect.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(size: u32, rows: usize, cols: usize, walls: bool) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "grid dimensions must be positive, got {rows}x{cols}"
        );

        let walls = if walls { Walls::CLOSED } else { Walls::OPEN };
        let cells = (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| Cell {
                    col,
                    row,
                    walls,
                    visited: false,
                })
            })
            .collect();

        Self {
            size,
            rows,
            cols,
            cells,
        }
    }

    /// Returns the edge length of the drawing surface.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the edge length of one cell on the drawing surface.
    ///
    /// Cells are square and the longer grid side spans the whole surface, so the grid always fits.
    pub fn cell_size(&self) -> f64 {
        f64::from(self.size) / self.rows.max(self.cols) as f64
    }

    /// Returns the goal cell, which is always the bottom-right corner.
    pub const fn goal(&self) -> Position {
        (self.cols - 1, self.rows - 1)
    }

    /// Returns every cell in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns whether `pos` lies inside the grid.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.0 < self.cols && pos.1 < self.rows
    }

    /// Returns the cell at `pos`, or `None` if it lies outside the grid.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index_of(pos).and_then(|index| self.cells.get(index))
    }

    /// Returns the number of cells that have been visited.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visited).count()
    }

    /// Returns the position adjacent to `pos` on `side`, if it lies inside the grid.
    pub fn neighbor(&self, pos: Position, side: Side) -> Option<Position> {
        let (col, row) = pos;
        let next = match side {
            Side::Top => (col, row.checked_sub(1)?),
            Side::Right => (col.checked_add(1)?, row),
            Side::Bottom => (col, row.checked_add(1)?),
            Side::Left => (col.checked_sub(1)?, row),
        };

        self.contains(next).then_some(next)
    }

    /// Returns the in-bounds positions adjacent to `pos`, in the order up, right, down, left.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        Side::ALL
            .into_iter()
            .filter_map(|side| self.neighbor(pos, side))
            .collect()
    }

    /// Returns the adjacent positions of `pos` whose cells have not been visited yet.
    ///
    /// Filtering out visited cells is what stops a carving walk from ever revisiting a cell.
    pub fn unvisited_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors(pos)
            .into_iter()
            .filter(|&next| self.cell(next).is_some_and(|cell| !cell.visited))
            .collect()
    }

    /// Picks one of the unvisited neighbors of `pos` uniformly at random.
    ///
    /// Returns `None` when every neighbor has already been visited.
    pub fn pick_random_unvisited_neighbor<R: Rng + ?Sized>(
        &self,
        pos: Position,
        rng: &mut R,
    ) -> Option<Position> {
        self.unvisited_neighbors(pos).choose(rng).copied()
    }

    /// Marks the cell at `pos` as visited.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    pub fn mark_visited(&mut self, pos: Position) {
        self.cell_at_mut(pos).visited = true;
    }

    /// Opens the wall shared by two adjacent cells, clearing the flag on both sides.
    ///
    /// # Panics
    ///
    /// Panics if the cells are not adjacent or if either lies outside the grid.
    pub fn remove_wall_between(&mut self, from: Position, to: Position) {
        self.set_wall_between(from, to, false);
    }

    /// Builds the wall shared by two adjacent cells, setting the flag on both sides.
    ///
    /// # Panics
    ///
    /// Panics if the cells are not adjacent or if either lies outside the grid.
    pub fn add_wall_between(&mut self, from: Position, to: Position) {
        self.set_wall_between(from, to, true);
    }

    /// Returns whether the wall shared by two cells is present, or `None` if they aren't adjacent
    /// grid cells.
    pub fn has_wall_between(&self, from: Position, to: Position) -> Option<bool> {
        let side = Side::between(from, to)?;
        let near = self.cell(from)?;
        let far = self.cell(to)?;

        Some(near.has_wall(side) || far.has_wall(side.opposite()))
    }

    /// Adds the outward-facing wall of every cell on the boundary of the grid.
    pub fn seal_border(&mut self) {
        let (last_col, last_row) = self.goal();

        for col in 0..self.cols {
            self.cell_at_mut((col, 0)).walls.top = true;
            self.cell_at_mut((col, last_row)).walls.bottom = true;
        }
        for row in 0..self.rows {
            self.cell_at_mut((0, row)).walls.left = true;
            self.cell_at_mut((last_col, row)).walls.right = true;
        }
    }

    /// Returns the number of open walls between adjacent cells.
    ///
    /// For a finished carving run this is the edge count of the spanning tree, one less than the
    /// number of cells.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Side::Right, Side::Bottom]
                    .into_iter()
                    .filter(|&side| self.is_open(cell.position(), side))
                    .count()
            })
            .sum()
    }

    /// Returns the number of cells reachable from `start` through open walls, `start` included.
    ///
    /// A `start` outside the grid reaches nothing.
    pub fn reachable_from(&self, start: Position) -> usize {
        if !self.contains(start) {
            return 0;
        }

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::from([start]);
        let mut count = 0;

        while let Some(pos) = queue.pop_front() {
            let Some(slot) = self.index_of(pos).and_then(|index| seen.get_mut(index)) else {
                continue;
            };
            if *slot {
                continue;
            }
            *slot = true;
            count += 1;

            for side in Side::ALL {
                if self.is_open(pos, side) {
                    if let Some(next) = self.neighbor(pos, side) {
                        queue.push_back(next);
                    }
                }
            }
        }

        count
    }

    /// Returns whether the wall on `side` of `pos` is open towards an in-bounds neighbor.
    fn is_open(&self, pos: Position, side: Side) -> bool {
        self.neighbor(pos, side)
            .and_then(|next| self.has_wall_between(pos, next))
            .is_some_and(|wall| !wall)
    }

    /// Sets the wall shared by two adjacent cells on both sides.
    fn set_wall_between(&mut self, from: Position, to: Position, present: bool) {
        let side = Side::between(from, to)
            .unwrap_or_else(|| panic!("cells {from:?} and {to:?} are not adjacent"));

        self.cell_at_mut(from).walls.set(side, present);
        self.cell_at_mut(to).walls.set(side.opposite(), present);
    }

    /// Returns the row-major index of `pos`, or `None` if it lies outside the grid.
    fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.1 * self.cols + pos.0)
    }

    /// Returns the cell at `pos` mutably, treating out-of-range positions as a programmer error.
    fn cell_at_mut(&mut self, pos: Position) -> &mut Cell {
        let (cols, rows) = (self.cols, self.rows);

        self.index_of(pos)
            .and_then(|index| self.cells.get_mut(index))
            .unwrap_or_else(|| panic!("cell {pos:?} lies outside the {cols}x{rows} grid"))
    }
}
