//! Declarative payload validation for book writes.
//!
//! A schema is a fixed list of [`FieldDef`] descriptors. [`validate`] walks the
//! descriptors in declaration order and collects every violation instead of
//! stopping at the first one, so a client sees all problems with a payload at once.
//!
//! The validator only judges: it never coerces or mutates the payload, and it
//! knows nothing about isbn uniqueness (the database enforces that on insert).

use serde_json::Value;
use thiserror::Error;

/// JSON types a field may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// A JSON integer. Floats and numeric strings are rejected.
    Integer,
}

impl FieldType {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64(),
        }
    }
}

/// Descriptor of a single payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    /// Alternative keys accepted for this field in request bodies.
    pub aliases: &'static [&'static str],
    pub field_type: FieldType,
    pub required: bool,
    /// Inclusive lower bound, integers only.
    pub minimum: Option<i64>,
}

impl FieldDef {
    pub const fn required_string(name: &'static str) -> Self {
        Self { name, aliases: &[], field_type: FieldType::String, required: true, minimum: None }
    }

    pub const fn required_integer(name: &'static str) -> Self {
        Self { name, aliases: &[], field_type: FieldType::Integer, required: true, minimum: None }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn with_minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Shape shared by `POST /books` and `PUT /books/{isbn}`.
pub const BOOK_SCHEMA: &[FieldDef] = &[
    FieldDef::required_string("isbn"),
    FieldDef::required_string("amazon_url").with_aliases(&["amazon-url"]),
    FieldDef::required_string("author"),
    FieldDef::required_string("language"),
    FieldDef::required_integer("pages").with_minimum(0),
    FieldDef::required_string("publisher"),
    FieldDef::required_string("title"),
    FieldDef::required_integer("year"),
];

/// A single reason a payload does not conform to its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("request body must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be of type {expected}, got {found}")]
    TypeMismatch { field: &'static str, expected: &'static str, found: &'static str },

    #[error("{field} must be greater than or equal to {minimum}, got {actual}")]
    BelowMinimum { field: &'static str, minimum: i64, actual: i64 },

    #[error("{field} was supplied more than once (as {keys})")]
    Conflicting { field: &'static str, keys: String },
}

impl Violation {
    /// The schema field this violation refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Violation::NotAnObject { .. } => None,
            Violation::Missing { field }
            | Violation::TypeMismatch { field, .. }
            | Violation::BelowMinimum { field, .. }
            | Violation::Conflicting { field, .. } => Some(*field),
        }
    }
}

/// Checks `payload` against `schema`. An empty result means the payload is valid.
pub fn validate(schema: &[FieldDef], payload: &Value) -> Vec<Violation> {
    let Some(obj) = payload.as_object() else {
        return vec![Violation::NotAnObject { found: json_type_name(payload) }];
    };

    let mut violations = Vec::new();
    for def in schema {
        let present: Vec<(&str, &Value)> =
            def.keys().filter_map(|key| obj.get(key).map(|value| (key, value))).collect();

        let value = match present.as_slice() {
            [] => {
                if def.required {
                    violations.push(Violation::Missing { field: def.name });
                }
                continue;
            }
            [(_, value)] => *value,
            _ => {
                let keys = present.iter().map(|(key, _)| *key).collect::<Vec<_>>().join(", ");
                violations.push(Violation::Conflicting { field: def.name, keys });
                continue;
            }
        };

        if !def.field_type.matches(value) {
            violations.push(Violation::TypeMismatch {
                field: def.name,
                expected: def.field_type.type_name(),
                found: json_type_name(value),
            });
            continue;
        }

        if let (Some(minimum), Some(actual)) = (def.minimum, value.as_i64()) {
            if actual < minimum {
                violations.push(Violation::BelowMinimum { field: def.name, minimum, actual });
            }
        }
    }
    violations
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() {
                "integer"
            } else if n.is_u64() {
                "integer out of range"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
