use std::{io, path::PathBuf};

use thiserror::Error;

/// Problems with the category table. None of these are fatal: the wheel
/// comes up in a "cannot spin" state instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("category '{key}' has invalid weight {weight}")]
    InvalidWeight { key: String, weight: f64 },

    #[error("weights of the {0} categories add up past the largest representable number")]
    TotalOverflow(usize),

    #[error("category key '{0}' appears more than once")]
    DuplicateKey(String),

    #[error("category at position {0} has an empty key")]
    EmptyKey(usize),

    #[error("category '{key}' has invalid color '{color}' (expected #RRGGBB)")]
    InvalidColor { key: String, color: String },

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed category table {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpinRejection {
    #[error("a spin is already in progress")]
    AlreadySpinning,

    #[error("no categories are configured")]
    NoCategories,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Spin(#[from] SpinRejection),

    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("unsupported shell: {0}. Use bash, zsh, or fish.")]
    UnsupportedShell(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
