//! Command line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{animation::DEFAULT_FRAME_DELAY_MS, generator::Algorithm};

/// Default number of cell rows, matching the classic 30 by 30 board.
pub const DEFAULT_ROWS: u16 = 30;

/// Runtime configuration parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Number of cell rows in the maze.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_ROWS,
        value_parser = clap::value_parser!(u16).range(1..=200)
    )]
    pub rows: u16,
    /// Number of cell columns in the maze; defaults to the number of rows.
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=200))]
    pub cols: Option<u16>,
    /// Seed for every run; a fresh random seed is drawn per run when absent.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Delay between two generation steps in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    pub frame_delay_ms: u64,
    /// Algorithm to start as soon as the application launches.
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,
    /// Leave no gaps in recursive division walls, which may cut regions off.
    #[arg(long)]
    pub sealed: bool,
    /// File to write logs to; logging stays disabled without one.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: None,
            seed: None,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            algorithm: None,
            sealed: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the number of cell rows.
    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    /// Returns the number of cell columns.
    pub fn cols(&self) -> usize {
        usize::from(self.cols.unwrap_or(self.rows))
    }

    /// Returns the delay between two generation steps.
    pub const fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
