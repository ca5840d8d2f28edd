use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unrecognised instant {0:?} (expected YYYY-MM-DD or YYYY-MM-DD HH:mm)")]
    Syntax(String),

    #[error("{0}")]
    OutOfRange(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config extension for {} (use .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid instant: {0}")]
    InvalidInstant(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
