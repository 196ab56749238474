use datagen_core::{Directive, FieldDeclaration};

use crate::errors::DirectiveError;

/// Name of the directive that marks a field for generation.
pub const GENERATE_DIRECTIVE: &str = "generate";
/// Name of the single argument `@generate` accepts.
pub const GENERATE_ARGUMENT: &str = "faker";

/// Expression extracted from a field's `@generate` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExpression {
    pub field: String,
    pub expression: String,
}

/// Extract the generation expression for `field`.
///
/// Returns `Ok(None)` when the field has no `@generate` directive. Directive
/// multiplicity is checked before the argument list so the diagnostic names
/// the first thing that is wrong.
pub fn resolve_field(
    type_name: &str,
    field: &FieldDeclaration,
) -> Result<Option<ResolvedExpression>, DirectiveError> {
    let mut matching = field
        .directives
        .iter()
        .filter(|directive| directive.name == GENERATE_DIRECTIVE);

    let Some(directive) = matching.next() else {
        return Ok(None);
    };
    if matching.next().is_some() {
        return Err(DirectiveError::MultipleDirectives {
            type_name: type_name.to_string(),
            field: field.name.clone(),
        });
    }

    extract_expression(type_name, &field.name, directive).map(Some)
}

fn extract_expression(
    type_name: &str,
    field: &str,
    directive: &Directive,
) -> Result<ResolvedExpression, DirectiveError> {
    let argument = match directive.arguments.as_slice() {
        [] => {
            return Err(DirectiveError::MissingArgument {
                type_name: type_name.to_string(),
                field: field.to_string(),
            });
        }
        [argument] => argument,
        arguments => {
            return Err(DirectiveError::TooManyArguments {
                type_name: type_name.to_string(),
                field: field.to_string(),
                count: arguments.len(),
            });
        }
    };

    if argument.name != GENERATE_ARGUMENT {
        return Err(DirectiveError::WrongArgumentName {
            type_name: type_name.to_string(),
            field: field.to_string(),
            expected: GENERATE_ARGUMENT.to_string(),
            actual: argument.name.clone(),
        });
    }

    Ok(ResolvedExpression {
        field: field.to_string(),
        expression: argument.value.clone(),
    })
}
