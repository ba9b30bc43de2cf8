//! Configuration error types.

use super::FieldPath;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("TOML parsing error in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("JSON parsing error in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

impl ConfigError {
    /// Collected diagnostics, if this is a validation failure.
    pub fn diagnostics(&self) -> Option<&ConfigDiagnostics> {
        match self {
            Self::Diagnostics(diag) => Some(diag),
            _ => None,
        }
    }
}

// ============================================================================
// ErrorCode
// ============================================================================

/// Machine-readable error code carried by every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    // shape errors
    MissingField,
    TypeMismatch,
    UnknownField,
    InvalidEnumValue,

    // resolution errors
    InvalidDefaultLocale,
    DuplicateLocale,
    DuplicateSidebarId,
    CyclicSidebarReference,
    DuplicateCategoryKey,
    UnknownCategoryKey,
    UnknownPreset,
    UnknownSidebarId,
    NestedDropdown,
    DocsPluginDisabled,
    InvalidValue,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "MissingField",
            Self::TypeMismatch => "TypeMismatch",
            Self::UnknownField => "UnknownField",
            Self::InvalidEnumValue => "InvalidEnumValue",
            Self::InvalidDefaultLocale => "InvalidDefaultLocale",
            Self::DuplicateLocale => "DuplicateLocale",
            Self::DuplicateSidebarId => "DuplicateSidebarId",
            Self::CyclicSidebarReference => "CyclicSidebarReference",
            Self::DuplicateCategoryKey => "DuplicateCategoryKey",
            Self::UnknownCategoryKey => "UnknownCategoryKey",
            Self::UnknownPreset => "UnknownPreset",
            Self::UnknownSidebarId => "UnknownSidebarId",
            Self::NestedDropdown => "NestedDropdown",
            Self::DocsPluginDisabled => "DocsPluginDisabled",
            Self::InvalidValue => "InvalidValue",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Diagnostic
// ============================================================================

/// A single configuration diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: ErrorCode,
    /// Config field path (e.g., "navbar.items[0].sidebarId")
    pub field_path: FieldPath,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, field_path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            code,
            field_path,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets, code dimmed
        let field = if self.field_path.is_root() {
            "<root>"
        } else {
            self.field_path.as_str()
        };
        writeln!(
            f,
            "{}{}{} {}",
            "[".dimmed(),
            field.cyan(),
            "]".dimmed(),
            self.code.as_str().dimmed()
        )?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Collect-then-report accumulator.
///
/// Every resolution stage pushes into one of these instead of returning on
/// the first problem, so a broken document reports all of its errors at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    errors: Vec<Diagnostic>,
    /// Non-fatal findings (unknown keys in permissive mode, unused locale configs).
    warnings: Vec<(FieldPath, String)>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, code: ErrorCode, field: FieldPath, message: impl Into<String>) {
        self.errors.push(Diagnostic::new(code, field, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        code: ErrorCode,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(Diagnostic::new(code, field, message).with_hint(hint));
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// Add a warning (collected for batch display).
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push((field, message.into()));
    }

    /// Move all errors and warnings of `other` into `self`, keeping order.
    pub fn extend(&mut self, other: ConfigDiagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Unwrap a stage result, recording its diagnostics on failure.
    pub fn absorb<T>(&mut self, result: Result<T, ConfigDiagnostics>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(diag) => {
                self.extend(diag);
                None
            }
        }
    }

    /// Print collected warnings in a grouped format.
    pub fn print_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }
        crate::log!("warning"; "config warnings:");
        for (field, message) in &self.warnings {
            eprintln!("- {}: {}", field.as_str(), message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[(FieldPath, String)] {
        &self.warnings
    }

    /// Error codes in report order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|d| d.code).collect()
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Like [`into_result`](Self::into_result), but carries a value on success.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        self.into_result().map(|()| value)
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
