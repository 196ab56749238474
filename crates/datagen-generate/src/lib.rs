//! Directive-driven fake document generation for datagen.
//!
//! Walks the object types of a parsed schema, resolves the `@generate`
//! directive on each field and evaluates its expression once per requested
//! document against a `faker` binding. The resulting document sets are
//! written as pretty-printed JSON arrays, one file per type.

pub mod assembler;
pub mod directive;
pub mod engine;
pub mod errors;
pub mod evaluator;
pub mod faker;
pub mod model;
pub mod output;

pub use assembler::{DocumentSet, GeneratedDocument, assemble_schema, assemble_type};
pub use directive::{GENERATE_ARGUMENT, GENERATE_DIRECTIVE, ResolvedExpression, resolve_field};
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::{DirectiveError, EvaluationError, GenerationError};
pub use evaluator::{ExpressionEvaluator, RhaiEvaluator};
pub use faker::Faker;
pub use model::{DEFAULT_OUT_DIR, GenerateOptions, GenerationReport, TypeReport};
