//! Error types for kafka-producer.

use crate::config::Field;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot load local env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("cannot read secrets file {} (is the stack deployed?): {source}", .path.display())]
    SecretsUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed secrets line {line}: expected KEY=VALUE")]
    MalformedLine { line: usize },

    #[error("invalid value: {0} is missing or zero")]
    MissingField(Field),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
