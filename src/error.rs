//! Error types for configuration tree loading and saving.

use thiserror::Error;

/// Errors raised by the configuration tree.
///
/// Decode errors (`Syntax`, `TypeMismatch`) abort a whole load. Nodes mutated
/// before the failure keep their new values; there is no rollback.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("syntax error at line {line}, column {column}: {source}")]
    Syntax {
        /// Byte offset into the input, when it can be derived
        offset: Option<usize>,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("type mismatch at {path}: {source}")]
    TypeMismatch {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("child configuration already exists at {path} with name '{name}'")]
    DuplicateName { path: String, name: String },

    #[error("expected a JSON object at {path}, found {found}")]
    RootKind { path: String, found: &'static str },

    #[error("failed to encode payload at {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl ConfigError {
    /// Build a syntax error from a serde_json parse failure on `input`.
    pub(crate) fn syntax(input: &[u8], source: serde_json::Error) -> Self {
        let line = source.line();
        let column = source.column();
        ConfigError::Syntax {
            offset: byte_offset(input, line, column),
            line,
            column,
            source,
        }
    }

    /// Classify a serde_json decode failure by its category.
    pub(crate) fn decode(input: &[u8], path: &str, source: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match source.classify() {
            Category::Syntax | Category::Eof => ConfigError::syntax(input, source),
            Category::Io => ConfigError::Io(source.into()),
            Category::Data => ConfigError::TypeMismatch {
                path: path.to_string(),
                source,
            },
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ConfigError::Syntax { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ConfigError::TypeMismatch { .. })
    }

    /// Render the error as one human-readable line.
    pub fn pretty(&self) -> String {
        match self {
            ConfigError::Syntax {
                offset: Some(offset),
                line,
                column,
                source,
            } => format!(
                "syntax error at offset {} (line {}, column {}): {}",
                offset, line, column, source
            ),
            other => format!("cfgtree: {}", other),
        }
    }
}

/// Name of a JSON value's kind, for `RootKind` errors.
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Convert serde_json's 1-based line and column into a byte offset.
///
/// serde_json reports line 0 when it has no position to give.
fn byte_offset(input: &[u8], line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let mut line_start = 0;
    for _ in 1..line {
        let newline = input[line_start..].iter().position(|&b| b == b'\n')?;
        line_start += newline + 1;
    }

    Some((line_start + column).min(input.len()))
}
