// src/error.rs
//
// Library error type.
//
// Only structurally broken input is an error. Records that are merely
// incomplete are dropped by the eligibility gate, and bad prices only make
// the value score unavailable.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Top-level JSON value was not an array of records
    #[error("Invalid input: expected a JSON array of wine records, found {found}")]
    NotAnArray { found: &'static str },

    /// One element of the array was not a JSON object
    #[error("Invalid input: record #{index} is not an object (found {found})")]
    RecordNotObject { index: usize, found: &'static str },

    /// Object shape was right but a field had an unusable type
    #[error("Invalid input: record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be read or has bad values
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Short JSON type name used in error messages.
pub(crate) fn json_kind(v: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
