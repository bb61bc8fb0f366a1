use thiserror::Error;

use crate::schema::FieldKind;

/// Malformed field or header schema. Raised at construction time, so the
/// affected category refuses to start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field '{0}' is a choice field but has no options")]
    MissingOptions(String),

    #[error("field '{0}' has an empty option list")]
    EmptyOptions(String),

    #[error("field name '{0}' appears more than once")]
    DuplicateField(String),

    #[error("default for field '{field}' is invalid: {reason}")]
    InvalidDefault { field: String, reason: String },

    #[error("header names must not be empty")]
    EmptyHeaderName,

    #[error("header '{0}' appears more than once")]
    DuplicateHeader(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("form has no field named '{0}'")]
    UnknownField(String),

    #[error("field '{field}' is a {actual} control, not a {expected} control")]
    KindMismatch { field: String, expected: FieldKind, actual: FieldKind },

    #[error("field '{field}' does not offer option '{option}'")]
    UnknownOption { field: String, option: String },
}

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("CompareError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for CompareError {
    fn from(error: std::io::Error) -> Self {
        CompareError::Io(Box::new(error))
    }
}
