use std::{fs::OpenOptions, path::Path};

use env_logger::{Builder, Env, Target};

const LOG_ENV: &str = "RANKWHEEL_LOG";

/// The terminal UI owns stderr, so its log goes to a file instead.
pub fn init_for_ui(log_path: &Path) {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, "info"));

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Warning: Could not open log file {}: {}", log_path.display(), e);
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    let _ = builder.format_timestamp_millis().try_init();
}

pub fn init_for_cli() {
    let _ = Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .try_init();
}
