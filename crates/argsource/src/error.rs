use std::path::PathBuf;
use thiserror::Error;

use crate::model::ValueKind;

/// Failure to convert a token into a value's target.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{name}: expected a value")]
    Missing { name: String },
    #[error("{name}: expected {expected} but got {got}")]
    Mismatch {
        name: String,
        expected: ValueKind,
        got: String,
    },
    #[error("{name}: invalid {expected} {got}: {reason}")]
    Invalid {
        name: String,
        expected: ValueKind,
        got: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to decode configuration document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An environment value could not be assigned to a positional or argument.
    #[error("{source} (from envar {var}={value:?})")]
    Assignment {
        var: String,
        value: String,
        #[source]
        source: ParseError,
    },
    /// A resolver supplied a value that the flag could not parse.
    #[error("{source} (resolved value {value})")]
    Flag {
        name: String,
        value: serde_json::Value,
        #[source]
        source: ParseError,
    },
    #[error("unknown configuration key '{key}'")]
    UnknownKey { key: String },
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
