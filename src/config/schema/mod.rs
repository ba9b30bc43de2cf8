//! Shape validation for raw config documents.
//!
//! The registry in [`registry`] declares, per section, which keys exist,
//! which are required and what kind of value each one holds. [`check`] walks a
//! document against it and collects every violation in a single pass.
//!
//! | Kind       | Accepts                                         |
//! |------------|-------------------------------------------------|
//! | `Str`      | string                                          |
//! | `Bool`     | boolean                                         |
//! | `Enum`     | string from a fixed set                         |
//! | `Array`    | array, each element checked against inner kind  |
//! | `Table`    | table with declared fields                      |
//! | `Map`      | table with arbitrary keys, uniform values       |
//! | `Tagged`   | table whose tag field selects the field set     |
//! | `Either`   | the first alternative whose value type matches  |
//! | `Opaque`   | any table, contents not inspected               |

pub mod registry;

use crate::config::types::{Diagnostic, ErrorCode, FieldPath};
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

// ============================================================================
// schema description
// ============================================================================

/// Expected kind of a config value.
#[derive(Debug)]
pub enum Kind {
    Str,
    Bool,
    Enum(&'static [&'static str]),
    Array(&'static Kind),
    Table(&'static [Field]),
    Map(&'static Kind),
    Tagged(&'static Tagged),
    Either(&'static Kind, &'static Kind),
    Opaque,
}

/// A declared field of a table.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
}

/// Table variants selected by a string tag field.
#[derive(Debug)]
pub struct Tagged {
    pub tag: &'static str,
    pub variants: &'static [Variant],
}

#[derive(Debug)]
pub struct Variant {
    pub name: &'static str,
    pub fields: &'static [Field],
}

pub(crate) const fn req(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

pub(crate) const fn opt(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

impl Kind {
    /// Human-readable description used in error messages.
    pub fn expected(&self) -> String {
        match self {
            Self::Str => "string".into(),
            Self::Bool => "boolean".into(),
            Self::Enum(members) => format!("one of {}", quote_list(members)),
            Self::Array(inner) => format!("array of {}", inner.expected()),
            Self::Table(_) | Self::Map(_) | Self::Opaque => "table".into(),
            Self::Tagged(tagged) => format!("table with `{}`", tagged.tag),
            Self::Either(a, b) => format!("{} or {}", a.expected(), b.expected()),
        }
    }

    /// Whether the value's top-level type fits this kind.
    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Str | Self::Enum(_) => value.is_str(),
            Self::Bool => value.is_bool(),
            Self::Array(_) => value.is_array(),
            Self::Table(_) | Self::Map(_) | Self::Tagged(_) | Self::Opaque => value.is_table(),
            Self::Either(a, b) => a.accepts(value) || b.accepts(value),
        }
    }
}

fn quote_list(members: &[&str]) -> String {
    members
        .iter()
        .map(|m| format!("\"{m}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Describe an actual value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string \"{s}\""),
        Value::Integer(i) => format!("integer {i}"),
        Value::Float(f) => format!("float {f}"),
        Value::Boolean(b) => format!("boolean {b}"),
        Value::Datetime(d) => format!("datetime {d}"),
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Table(_) => "table".into(),
    }
}

// ============================================================================
// unknown-key policy
// ============================================================================

/// What to do with keys the registry does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Report unknown keys as `UnknownField` errors.
    Strict,
    /// Pass unknown keys through, reporting them as warnings.
    #[default]
    Permissive,
}

// ============================================================================
// checking
// ============================================================================

/// A shape violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub code: ErrorCode,
    pub path: FieldPath,
    pub expected: String,
    pub actual: String,
}

impl SchemaError {
    pub fn message(&self) -> String {
        match self.code {
            ErrorCode::MissingField => format!("missing required field ({})", self.expected),
            ErrorCode::UnknownField => "unknown field".to_string(),
            _ => format!("expected {}, found {}", self.expected, self.actual),
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let message = self.message();
        Diagnostic::new(self.code, self.path, message)
    }
}

/// Result of walking a document against a schema.
#[derive(Debug, Default)]
pub struct ShapeReport {
    /// Missing fields, type mismatches and invalid enum members.
    pub errors: Vec<SchemaError>,
    /// Keys not declared by the schema, with their values.
    pub unknown: Vec<(FieldPath, Value)>,
}

impl ShapeReport {
    /// Whether any error (not unknown key) lies at or below `path`.
    pub fn has_errors_under(&self, path: &str) -> bool {
        self.errors.iter().any(|e| is_under(e.path.as_str(), path))
    }

    /// Apply the unknown-key policy and return the final error list.
    pub fn into_errors(self, policy: UnknownKeys) -> Vec<SchemaError> {
        let mut errors = self.errors;
        if policy == UnknownKeys::Strict {
            errors.extend(self.unknown.into_iter().map(|(path, _)| SchemaError {
                code: ErrorCode::UnknownField,
                path,
                expected: "no such field".into(),
                actual: "present".into(),
            }));
        }
        errors
    }
}

fn is_under(candidate: &str, prefix: &str) -> bool {
    candidate == prefix
        || candidate
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
}

/// Validate the shape of a site config document.
///
/// Collects all errors in one pass; under [`UnknownKeys::Strict`] undeclared
/// keys are errors as well.
pub fn validate_shape(document: &Table, policy: UnknownKeys) -> Vec<SchemaError> {
    check(document, registry::DOCUMENT).into_errors(policy)
}

/// Validate the shape of a sidebar document.
pub fn validate_sidebar_shape(document: &Table, policy: UnknownKeys) -> Vec<SchemaError> {
    check(document, registry::SIDEBAR_DOCUMENT).into_errors(policy)
}

/// Walk `document` against the root field list.
pub fn check(document: &Table, fields: &'static [Field]) -> ShapeReport {
    let mut report = ShapeReport::default();
    check_table(document, fields, &[], &FieldPath::root(), &mut report);
    report
}

fn check_table(
    table: &Table,
    fields: &'static [Field],
    allowed: &[&str],
    path: &FieldPath,
    report: &mut ShapeReport,
) {
    for field in fields {
        let field_path = path.key(field.name);
        match table.get(field.name) {
            Some(value) => check_value(value, &field.kind, &field_path, report),
            None if field.required => report.errors.push(SchemaError {
                code: ErrorCode::MissingField,
                path: field_path,
                expected: field.kind.expected(),
                actual: "nothing".into(),
            }),
            None => {}
        }
    }

    for (key, value) in table {
        let declared = fields.iter().any(|f| f.name == key) || allowed.contains(&key.as_str());
        if !declared {
            report.unknown.push((path.key(key), value.clone()));
        }
    }
}

fn check_value(value: &Value, kind: &'static Kind, path: &FieldPath, report: &mut ShapeReport) {
    if !kind.accepts(value) {
        report.errors.push(SchemaError {
            code: ErrorCode::TypeMismatch,
            path: path.clone(),
            expected: kind.expected(),
            actual: describe(value),
        });
        return;
    }

    match (kind, value) {
        (Kind::Enum(members), Value::String(s)) if !members.contains(&s.as_str()) => {
            report.errors.push(SchemaError {
                code: ErrorCode::InvalidEnumValue,
                path: path.clone(),
                expected: kind.expected(),
                actual: describe(value),
            });
        }
        (Kind::Array(inner), Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_value(item, inner, &path.index(i), report);
            }
        }
        (Kind::Table(fields), Value::Table(table)) => {
            check_table(table, fields, &[], path, report);
        }
        (Kind::Map(inner), Value::Table(table)) => {
            for (key, item) in table {
                check_value(item, inner, &path.key(key), report);
            }
        }
        (Kind::Tagged(tagged), Value::Table(table)) => check_tagged(table, tagged, path, report),
        (Kind::Either(a, b), _) => {
            let chosen: &'static Kind = if a.accepts(value) { a } else { b };
            check_value(value, chosen, path, report);
        }
        _ => {}
    }
}

fn check_tagged(table: &Table, tagged: &'static Tagged, path: &FieldPath, report: &mut ShapeReport) {
    let tag_path = path.key(tagged.tag);
    let names: Vec<&str> = tagged.variants.iter().map(|v| v.name).collect();
    let expected = format!("one of {}", quote_list(&names));

    let tag = match table.get(tagged.tag) {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            report.errors.push(SchemaError {
                code: ErrorCode::TypeMismatch,
                path: tag_path,
                expected,
                actual: describe(other),
            });
            return;
        }
        None => {
            report.errors.push(SchemaError {
                code: ErrorCode::MissingField,
                path: tag_path,
                expected,
                actual: "nothing".into(),
            });
            return;
        }
    };

    match tagged.variants.iter().find(|v| v.name == tag) {
        Some(variant) => check_table(table, variant.fields, &[tagged.tag], path, report),
        None => report.errors.push(SchemaError {
            code: ErrorCode::InvalidEnumValue,
            path: tag_path,
            expected,
            actual: format!("string \"{tag}\""),
        }),
    }
}
