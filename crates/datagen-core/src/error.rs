use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across datagen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema file does not exist.
    #[error("schema file {} not found", .0.display())]
    SchemaNotFound(PathBuf),
    /// The schema text is not valid GraphQL SDL.
    #[error("failed to parse schema: {0}")]
    SchemaParse(String),
    /// Reading the schema failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by datagen crates.
pub type Result<T> = std::result::Result<T, Error>;
