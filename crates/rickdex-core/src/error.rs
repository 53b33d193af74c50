//! Error types for rickdex

use thiserror::Error;

use crate::schema::Field;

/// Errors raised while editing form fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field {field} expects a {expected} value")]
    WrongKind { field: Field, expected: &'static str },
}

/// Errors from the character API. Only ever logged; the user sees one
/// generic message regardless of the variant.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Umbrella error for the crate
#[derive(Error, Debug)]
pub enum FinderError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for rickdex
pub type Result<T> = std::result::Result<T, FinderError>;
