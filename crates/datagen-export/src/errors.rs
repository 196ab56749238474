use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while exporting generated documents.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("the credentials file was not found at {}", .0.display())]
    CredentialsNotFound(PathBuf),
    #[error("invalid credentials file {}: {message}", .path.display())]
    Credentials { path: PathBuf, message: String },
    #[error(
        "couldn't find the output directory {}; use `datagen generate` to create it (run `datagen generate --help` to learn more)",
        .0.display()
    )]
    OutputDirMissing(PathBuf),
    #[error("{} is not an array of JSON objects: {message}", .path.display())]
    InvalidDocumentFile { path: PathBuf, message: String },
    #[error("bson conversion error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
