use std::path::Path;

use graphql_parser::schema::{self as gql, Definition, TypeDefinition};

use crate::error::{Error, Result};
use crate::schema::{Argument, Directive, FieldDeclaration, SchemaDocument, TypeDeclaration};

/// Read and parse a schema file.
pub fn load_schema(path: &Path) -> Result<SchemaDocument> {
    if !path.exists() {
        return Err(Error::SchemaNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    parse_schema(&text)
}

/// Parse GraphQL SDL and keep only object type definitions.
///
/// Interfaces, inputs, enums, unions, scalars, schema and directive
/// definitions, and type extensions are dropped.
pub fn parse_schema(text: &str) -> Result<SchemaDocument> {
    let document = gql::parse_schema::<String>(text)
        .map_err(|err| Error::SchemaParse(err.to_string()))?;

    let types = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::TypeDefinition(TypeDefinition::Object(object)) => {
                Some(convert_object(object))
            }
            _ => None,
        })
        .collect();

    Ok(SchemaDocument { types })
}

fn convert_object(object: &gql::ObjectType<'_, String>) -> TypeDeclaration {
    let fields = object
        .fields
        .iter()
        .map(|field| {
            let directives = field.directives.iter().map(convert_directive).collect();
            FieldDeclaration::new(field.name.clone(), directives)
        })
        .collect();
    TypeDeclaration::new(object.name.clone(), fields)
}

fn convert_directive(directive: &gql::Directive<'_, String>) -> Directive {
    let arguments = directive
        .arguments
        .iter()
        .map(|(name, value)| Argument::new(name.clone(), literal_text(value)))
        .collect();
    Directive::new(directive.name.clone(), arguments)
}

fn literal_text(value: &gql::Value<'_, String>) -> String {
    match value {
        gql::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
