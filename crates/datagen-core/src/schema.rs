use serde::{Deserialize, Serialize};

/// Object type declarations extracted from a schema, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub types: Vec<TypeDeclaration>,
}

impl SchemaDocument {
    /// Look up a declaration by type name.
    pub fn type_named(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types.iter().find(|decl| decl.name == name)
    }
}

/// An object type and its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// A field of an object type with the directives attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    pub directives: Vec<Directive>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, directives: Vec<Directive>) -> Self {
        Self {
            name: name.into(),
            directives,
        }
    }

    /// Field without any directive.
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// A directive annotation such as `@generate(faker: "...")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl Directive {
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// A named directive argument.
///
/// `value` holds the literal as written: string literals are unquoted, other
/// literals keep their GraphQL rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
