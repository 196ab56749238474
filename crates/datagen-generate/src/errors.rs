use std::path::PathBuf;

use thiserror::Error;

/// Invalid `@generate` usage on a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error(
        "you cannot have more than 1 @generate directive next to one field; the erroneous field is \"{field}\" under type \"{type_name}\""
    )]
    MultipleDirectives { type_name: String, field: String },
    #[error(
        "the @generate directive on field \"{field}\" under type \"{type_name}\" needs a \"faker\" argument"
    )]
    MissingArgument { type_name: String, field: String },
    #[error(
        "too many arguments ({count}) passed to the @generate directive next to \"{field}\" under type \"{type_name}\"; only one is allowed"
    )]
    TooManyArguments {
        type_name: String,
        field: String,
        count: usize,
    },
    #[error(
        "the @generate directive only accepts one argument called \"{expected}\" but got \"{actual}\"; the erroneous field is \"{field}\" under type \"{type_name}\""
    )]
    WrongArgumentName {
        type_name: String,
        field: String,
        expected: String,
        actual: String,
    },
}

impl DirectiveError {
    /// Type that owns the offending field.
    pub fn type_name(&self) -> &str {
        match self {
            Self::MultipleDirectives { type_name, .. }
            | Self::MissingArgument { type_name, .. }
            | Self::TooManyArguments { type_name, .. }
            | Self::WrongArgumentName { type_name, .. } => type_name,
        }
    }

    /// Offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::MultipleDirectives { field, .. }
            | Self::MissingArgument { field, .. }
            | Self::TooManyArguments { field, .. }
            | Self::WrongArgumentName { field, .. } => field,
        }
    }
}

/// Failure raised by the expression sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("script error: {0}")]
    Script(String),
    #[error("result cannot be represented as JSON: {0}")]
    Conversion(String),
}

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Directive(#[from] DirectiveError),
    #[error(
        "failed to evaluate the expression of field \"{field}\" under type \"{type_name}\" (document {index}): {source}"
    )]
    Evaluation {
        type_name: String,
        field: String,
        index: usize,
        #[source]
        source: EvaluationError,
    },
    #[error(transparent)]
    Schema(#[from] datagen_core::Error),
    #[error("invalid output path: {}", .0.display())]
    InvalidOutputPath(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
