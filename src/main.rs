//! This crate contains the source code for the binary of the maze animator mazetui.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazetui::{config::Config, logging, App};

fn main() -> Result<()> {
    install()?;
    let config = Config::parse();
    logging::init(config.log_file.as_deref())?;

    let mut terminal = ratatui::init();
    let result = App::new(config).run(&mut terminal);
    ratatui::restore();

    result
}
