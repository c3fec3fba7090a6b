use std::io;

use clap::Parser;

mod app;
mod canvas;
mod cli;
mod constants;
mod domain;
mod error;
mod logging;
mod storage;
mod wheel;

use cli::{Cli, WheelOptions};

fn main() -> Result<(), io::Error> {
    let mut cli = Cli::parse();

    if let Some(command) = cli.command.take() {
        logging::init_for_cli();
        cli::run_cli(cli, command);
        return Ok(());
    }

    logging::init_for_ui(&storage::get_log_path());
    let options = WheelOptions::from_cli(&cli);
    log::info!(
        "starting ui with {} ({} ms, {} rotations)",
        options.categories_path.display(),
        options.duration.as_millis(),
        options.rotations
    );
    app::run_ui(&options)
}
