use std::num::NonZeroUsize;

use serde_json::{Map, Value};
use tracing::debug;

use datagen_core::{SchemaDocument, TypeDeclaration};

use crate::directive::resolve_field;
use crate::errors::GenerationError;
use crate::evaluator::ExpressionEvaluator;

/// One generated record: field name to evaluated value, in declaration order.
pub type GeneratedDocument = Map<String, Value>;

/// All documents generated for one type.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSet {
    pub type_name: String,
    pub documents: Vec<GeneratedDocument>,
    /// Fields that carried a valid `@generate` directive.
    pub generated_fields: Vec<String>,
    /// Fields without the directive.
    pub skipped_fields: Vec<String>,
}

/// Build `count` documents for `decl`.
///
/// Returns `Ok(None)` for a type without fields. Each resolved expression is
/// evaluated once per document; nothing is cached between documents. The
/// first directive or evaluation error aborts assembly.
pub fn assemble_type(
    decl: &TypeDeclaration,
    count: NonZeroUsize,
    evaluator: &dyn ExpressionEvaluator,
) -> Result<Option<DocumentSet>, GenerationError> {
    if decl.fields.is_empty() {
        debug!(type_name = %decl.name, "type has no fields, skipping");
        return Ok(None);
    }

    let mut documents: Vec<GeneratedDocument> = vec![Map::new(); count.get()];
    let mut generated_fields = Vec::new();
    let mut skipped_fields = Vec::new();

    for field in &decl.fields {
        let Some(resolved) = resolve_field(&decl.name, field)? else {
            skipped_fields.push(field.name.clone());
            continue;
        };

        for (index, document) in documents.iter_mut().enumerate() {
            let value = evaluator.evaluate(&resolved.expression).map_err(|source| {
                GenerationError::Evaluation {
                    type_name: decl.name.clone(),
                    field: field.name.clone(),
                    index,
                    source,
                }
            })?;
            document.insert(resolved.field.clone(), value);
        }
        generated_fields.push(resolved.field);
    }

    Ok(Some(DocumentSet {
        type_name: decl.name.clone(),
        documents,
        generated_fields,
        skipped_fields,
    }))
}

/// Assemble every type of `schema` in source order.
///
/// `evaluator_for` supplies the evaluator used for each type. Types without
/// fields are left out of the result; the first failure stops the walk.
pub fn assemble_schema<E, F>(
    schema: &SchemaDocument,
    count: NonZeroUsize,
    mut evaluator_for: F,
) -> Result<Vec<DocumentSet>, GenerationError>
where
    E: ExpressionEvaluator,
    F: FnMut(&TypeDeclaration) -> E,
{
    let mut sets = Vec::with_capacity(schema.types.len());
    for decl in &schema.types {
        let evaluator = evaluator_for(decl);
        if let Some(set) = assemble_type(decl, count, &evaluator)? {
            sets.push(set);
        }
    }
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use datagen_core::{Argument, Directive, FieldDeclaration};
    use serde_json::json;

    use super::*;
    use crate::directive::{GENERATE_ARGUMENT, GENERATE_DIRECTIVE};
    use crate::errors::{DirectiveError, EvaluationError};

    fn generated(name: &str, expression: &str) -> FieldDeclaration {
        FieldDeclaration::new(
            name,
            vec![Directive::new(
                GENERATE_DIRECTIVE,
                vec![Argument::new(GENERATE_ARGUMENT, expression)],
            )],
        )
    }

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero count")
    }

    /// Returns an increasing number on every call.
    struct Counter {
        calls: Cell<u64>,
    }

    impl Counter {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl ExpressionEvaluator for Counter {
        fn evaluate(&self, _expression: &str) -> Result<Value, EvaluationError> {
            let next = self.calls.get() + 1;
            self.calls.set(next);
            Ok(json!(next))
        }
    }

    #[test]
    fn empty_type_produces_nothing() {
        let decl = TypeDeclaration::new("Empty", Vec::new());
        let counter = Counter::new();
        let result = assemble_type(&decl, count(3), &counter).expect("assemble");
        assert!(result.is_none());
        assert_eq!(counter.calls.get(), 0);
    }

    #[test]
    fn fields_without_directive_are_absent() {
        let decl = TypeDeclaration::new(
            "Person",
            vec![generated("name", "faker.person.fullName()"), FieldDeclaration::plain("age")],
        );
        let set = assemble_type(&decl, count(3), &Counter::new())
            .expect("assemble")
            .expect("document set");

        assert_eq!(set.type_name, "Person");
        assert_eq!(set.documents.len(), 3);
        for document in &set.documents {
            assert!(document.contains_key("name"));
            assert!(!document.contains_key("age"));
        }
        assert_eq!(set.generated_fields, vec!["name".to_string()]);
        assert_eq!(set.skipped_fields, vec!["age".to_string()]);
    }

    #[test]
    fn evaluates_once_per_document_without_caching() {
        let decl = TypeDeclaration::new(
            "Order",
            vec![generated("id", "next()"), generated("total", "next()")],
        );
        let counter = Counter::new();
        let set = assemble_type(&decl, count(4), &counter)
            .expect("assemble")
            .expect("document set");

        assert_eq!(counter.calls.get(), 8);
        let ids: Vec<&Value> = set.documents.iter().map(|doc| &doc["id"]).collect();
        assert_eq!(ids, vec![&json!(1), &json!(2), &json!(3), &json!(4)]);
        let totals: Vec<&Value> = set.documents.iter().map(|doc| &doc["total"]).collect();
        assert_eq!(totals, vec![&json!(5), &json!(6), &json!(7), &json!(8)]);
    }

    #[test]
    fn keys_follow_declaration_order() {
        let decl = TypeDeclaration::new(
            "Person",
            vec![
                generated("zeta", "1"),
                FieldDeclaration::plain("skipped"),
                generated("alpha", "2"),
            ],
        );
        let set = assemble_type(&decl, count(1), &Counter::new())
            .expect("assemble")
            .expect("document set");
        let keys: Vec<&String> = set.documents[0].keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn type_without_generated_fields_yields_empty_documents() {
        let decl = TypeDeclaration::new("Audit", vec![FieldDeclaration::plain("note")]);
        let set = assemble_type(&decl, count(2), &Counter::new())
            .expect("assemble")
            .expect("document set");
        assert_eq!(set.documents, vec![Map::new(), Map::new()]);
    }

    #[test]
    fn directive_errors_stop_assembly() {
        let decl = TypeDeclaration::new(
            "User",
            vec![
                generated("name", "1"),
                FieldDeclaration::new(
                    "email",
                    vec![Directive::new(
                        GENERATE_DIRECTIVE,
                        vec![
                            Argument::new(GENERATE_ARGUMENT, "faker.internet.email()"),
                            Argument::new("unique", "true"),
                        ],
                    )],
                ),
                generated("late", "1"),
            ],
        );
        let counter = Counter::new();
        let err = assemble_type(&decl, count(2), &counter).expect_err("too many arguments");

        assert!(matches!(
            err,
            GenerationError::Directive(DirectiveError::TooManyArguments { ref type_name, ref field, count: 2 })
                if type_name == "User" && field == "email"
        ));
        assert_eq!(counter.calls.get(), 2, "later fields must not be evaluated");
    }

    #[test]
    fn evaluation_errors_carry_location() {
        let decl = TypeDeclaration::new("Person", vec![generated("name", "boom")]);
        let failing = |_: &str| -> Result<Value, EvaluationError> {
            Err(EvaluationError::Script("boom".to_string()))
        };
        let err = assemble_type(&decl, count(2), &failing).expect_err("evaluation fails");
        match err {
            GenerationError::Evaluation {
                type_name,
                field,
                index,
                source,
            } => {
                assert_eq!(type_name, "Person");
                assert_eq!(field, "name");
                assert_eq!(index, 0);
                assert_eq!(source, EvaluationError::Script("boom".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn schema_assembly_reports_first_failure_in_source_order() {
        let bad = |name: &str| {
            FieldDeclaration::new(
                name,
                vec![Directive::new(GENERATE_DIRECTIVE, Vec::new())],
            )
        };
        let schema = SchemaDocument {
            types: vec![
                TypeDeclaration::new("Ok", vec![generated("a", "1")]),
                TypeDeclaration::new("First", vec![bad("x")]),
                TypeDeclaration::new("Second", vec![bad("y")]),
            ],
        };

        let mut visited = Vec::new();
        let err = assemble_schema(&schema, count(1), |decl| {
            visited.push(decl.name.clone());
            Counter::new()
        })
        .expect_err("missing argument");

        assert!(matches!(
            err,
            GenerationError::Directive(DirectiveError::MissingArgument { ref type_name, .. })
                if type_name == "First"
        ));
        assert_eq!(visited, vec!["Ok".to_string(), "First".to_string()]);
    }

    #[test]
    fn schema_assembly_drops_empty_types() {
        let schema = SchemaDocument {
            types: vec![
                TypeDeclaration::new("Empty", Vec::new()),
                TypeDeclaration::new("Person", vec![generated("name", "1")]),
            ],
        };
        let sets = assemble_schema(&schema, count(2), |_| Counter::new()).expect("assemble");
        let names: Vec<&str> = sets.iter().map(|set| set.type_name.as_str()).collect();
        assert_eq!(names, vec!["Person"]);
    }
}
