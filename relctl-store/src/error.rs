//! Error types for relctl-store

use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Database error type
///
/// Missing roster rows are not errors: the roster repository logs them and
/// returns an empty result instead.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}
