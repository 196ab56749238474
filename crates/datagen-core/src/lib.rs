//! Core contracts and helpers for datagen.
//!
//! This crate defines the schema model the generator walks (object types,
//! fields, directives and their arguments), the GraphQL SDL adapter that
//! produces it, and utilities shared by the generate, export and CLI crates.

pub mod error;
pub mod parse;
pub mod redaction;
pub mod schema;

pub use error::{Error, Result};
pub use parse::{load_schema, parse_schema};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use schema::{Argument, Directive, FieldDeclaration, SchemaDocument, TypeDeclaration};
