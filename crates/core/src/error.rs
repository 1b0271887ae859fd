//! Error types for page object validation.

use thiserror::Error;

/// A malformed or internally inconsistent page object record.
///
/// Raised only while a record is being constructed; a validated record
/// never produces one afterwards.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaViolation {
    #[error("unknown object_type: {0:?}")]
    UnknownObjectType(String),

    #[error("{kind} record is missing required field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("field `{field}`: expected {expected}, got {got}")]
    FieldType {
        field: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("field `{field}` is {supplied} but its inputs give {derived}")]
    Inconsistent {
        field: &'static str,
        supplied: f64,
        derived: f64,
    },

    #[error("fields `{field}` and `{alias}` must hold the same value")]
    AliasMismatch {
        field: &'static str,
        alias: &'static str,
    },

    #[error("inverted extent: {low_name}={low} exceeds {high_name}={high}")]
    InvertedExtent {
        low_name: &'static str,
        low: f64,
        high_name: &'static str,
        high: f64,
    },

    #[error("field `{0}` is not a finite number")]
    NonFinite(&'static str),

    #[error("field `{field}` is out of range: {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
    },

    #[error("page height must be finite and non-negative, got {0}")]
    InvalidPageHeight(f64),

    #[error("page_number must be >= 1, got {0}")]
    InvalidPageNumber(i64),
}

/// Convenience Result type alias for SchemaViolation.
pub type Result<T> = std::result::Result<T, SchemaViolation>;
