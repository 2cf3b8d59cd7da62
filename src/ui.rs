//! User interface rendering for the maze screen.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Line as Segment},
        Block, BorderType, Clear,
    },
    Frame,
};

use crate::{
    grid::{Grid, Position, Side},
    session::Session,
    App,
};

/// Largest edge length of the drawing surface.
pub(crate) const MAX_SURFACE: u32 = 500;

/// Colour of the wall lines.
const WALL_COLOR: Color = Color::White;

/// Fill colour of the cell a generator is working on.
const CURRENT_COLOR: Color = Color::Rgb(0xdb, 0x54, 0x61);

/// Fill colour of the goal cell in the bottom-right corner.
const GOAL_COLOR: Color = Color::Rgb(0xb3, 0xf2, 0xdd);

/// Number of horizontal strokes used to fill a cell.
const FILL_STROKES: u32 = 5;

/// Computes the edge length of the square drawing surface for a display of the given size.
///
/// The shorter display side is rounded down to the nearest hundred and capped at
/// [`MAX_SURFACE`]. Displays under a hundred units keep their exact shorter side so that small
/// terminals still get something to draw on.
pub(crate) fn surface_edge(width: u32, height: u32) -> u32 {
    let edge = width.min(height);
    let rounded = edge / 100 * 100;

    if rounded == 0 {
        edge.max(1)
    } else {
        rounded.min(MAX_SURFACE)
    }
}

/// Updates the application UI based on the persistent state.
///
/// This function draws the maze canvas inside a bordered block together with a status line at the
/// bottom of the terminal. The surface edge for upcoming runs is recomputed from the canvas area on
/// every frame.
///
/// # Errors
///
/// This function may return errors if the layout does not produce the expected areas.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(frame.area());
    let maze_area = *layout.first().ok_or_eyre("failed to get maze area from layout")?;
    let status_area = *layout.last().ok_or_eyre("failed to get status area from layout")?;

    let block = Block::bordered()
        .title("mazetui")
        .title_bottom("(d) dfs / (r) division / (f) finish / (x) abort / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);
    let inner = block.inner(maze_area);
    frame.render_widget(block, maze_area);

    let space = square_area(inner)?;
    app.surface = surface_edge(u32::from(space.width) * 2, u32::from(space.height) * 4);

    let current = app.session.as_ref().and_then(Session::current);
    maze(frame, app.grid(), current, space);

    frame.render_widget(status_line(app), status_area);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Returns the largest centered area of `area` that shows up square on screen.
///
/// Terminal cells are about twice as tall as they are wide, so the area is twice as many columns
/// wide as it is rows tall.
///
/// # Errors
///
/// This function may return errors if the layout does not produce the expected areas.
pub(crate) fn square_area(area: Rect) -> Result<Rect> {
    let height = area.height.min(area.width / 2);

    let column = *Layout::horizontal([Constraint::Length(height * 2)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .ok_or_eyre("failed to center maze horizontally")?;

    Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(column)
        .first()
        .copied()
        .ok_or_eyre("failed to center maze vertically")
}

/// Renders the grid onto a canvas covering `area`.
///
/// Walls are drawn first, then the goal cell and finally the current cell, so highlights stay on
/// top of the lines around them.
pub(crate) fn maze(frame: &mut Frame, grid: &Grid, current: Option<Position>, area: Rect) {
    let size = f64::from(grid.size());
    let walls = wall_segments(grid);
    let goal = fill_segments(grid, grid.goal(), GOAL_COLOR);
    let highlight = current
        .map(|pos| fill_segments(grid, pos, CURRENT_COLOR))
        .unwrap_or_default();

    let canvas = Canvas::default()
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .marker(Marker::Braille)
        .background_color(Color::Black)
        .paint(|ctx| {
            for segment in &walls {
                ctx.draw(segment);
            }
            ctx.layer();
            for segment in goal.iter().chain(&highlight) {
                ctx.draw(segment);
            }
        });

    frame.render_widget(canvas, area);
}

/// Returns the canvas bounds of the cell at `pos` as `(left, bottom, right, top)`.
///
/// Rows grow downwards on the grid while the canvas y axis grows upwards.
fn cell_bounds(grid: &Grid, pos: Position) -> (f64, f64, f64, f64) {
    let cell = grid.cell_size();
    let top = f64::from(grid.size()) - pos.1 as f64 * cell;
    let left = pos.0 as f64 * cell;

    (left, top - cell, left + cell, top)
}

/// Returns one line segment per wall present in the grid.
pub(crate) fn wall_segments(grid: &Grid) -> Vec<Segment> {
    let mut segments = Vec::new();

    for cell in grid.cells() {
        let (left, bottom, right, top) = cell_bounds(grid, cell.position());
        for side in Side::ALL {
            if !cell.has_wall(side) {
                continue;
            }
            let (x1, y1, x2, y2) = match side {
                Side::Top => (left, top, right, top),
                Side::Right => (right, bottom, right, top),
                Side::Bottom => (left, bottom, right, bottom),
                Side::Left => (left, bottom, left, top),
            };
            segments.push(Segment::new(x1, y1, x2, y2, WALL_COLOR));
        }
    }

    segments
}

/// Returns horizontal strokes filling the inside of the cell at `pos`.
pub(crate) fn fill_segments(grid: &Grid, pos: Position, color: Color) -> Vec<Segment> {
    let (left, bottom, right, top) = cell_bounds(grid, pos);
    let inset = grid.cell_size() * 0.15;
    let (left, bottom, right, top) = (left + inset, bottom + inset, right - inset, top - inset);
    let gap = (top - bottom) / f64::from(FILL_STROKES - 1);

    (0..FILL_STROKES)
        .map(|stroke| {
            let y = f64::from(stroke).mul_add(gap, bottom);
            Segment::new(left, y, right, y, color)
        })
        .collect()
}

/// Builds the status line describing the active or last run.
pub(crate) fn status_line(app: &App) -> Line<'static> {
    let style = Style::default().fg(Color::Green);

    let Some(session) = app.session.as_ref() else {
        return Line::styled(
            "Press (d) for depth-first search or (r) for recursive division",
            style,
        )
        .centered();
    };

    let grid = session.grid();
    let state = if session.is_aborted() {
        "aborted"
    } else {
        session.phase().label()
    };

    Line::styled(
        format!(
            "{} | {state} | steps {} | visited {}/{} | passages {} | seed {}",
            session.algorithm().label(),
            session.steps(),
            grid.visited_count(),
            grid.cells().len(),
            grid.passage_count(),
            session.seed(),
        ),
        style,
    )
    .centered()
}
