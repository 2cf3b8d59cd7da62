//! Maze generation and animation for the terminal.
//!
//! The library is split into a generation core and a terminal front-end. The core consists of the
//! [`grid`] data model, the step-driven algorithms in [`generator`] and the [`session`] handle that
//! owns a single run. The front-end paces runs with the [`animation`] module and draws them with
//! Ratatui through [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod animation;
mod app;
pub mod config;
mod events;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod session;
mod ui;

pub use app::App;
