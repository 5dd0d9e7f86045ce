//! Error types for dictxml

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    RootNotObject { found: &'static str },
    InvalidNamespace { found: String },
    InvalidText { found: &'static str },
    InvalidAttributeValue { name: String, found: &'static str },
    NestedSequence,
    MaxDepthExceeded { max: u16 },
    InvalidName { name: String },
    InvalidCharacter { ch: char },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotObject { found } => {
                write!(f, "root value must be an object, found {found}")
            }
            Self::InvalidNamespace { found } => {
                write!(f, "namespace must be a non-empty string or null, found {found}")
            }
            Self::InvalidText { found } => {
                write!(f, "text content must be a scalar, found {found}")
            }
            Self::InvalidAttributeValue { name, found } => {
                write!(
                    f,
                    "attribute {name} must be a string or number, found {found}"
                )
            }
            Self::NestedSequence => write!(f, "array items must not be arrays"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::InvalidName { name } => write!(f, "invalid xml name: {name:?}"),
            Self::InvalidCharacter { ch } => {
                write!(f, "character U+{:04X} is not allowed in xml", u32::from(*ch))
            }
        }
    }
}

/// Main error type for dictxml
///
/// `path` is the slash separated element path (`/root/b/@id`) at which the
/// offending value was found.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("error at {path}: {message}")]
pub struct Error {
    kind: ErrorKind,
    path: String,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, path: impl Into<String>) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            path: path.into(),
            message,
        }
    }

    pub fn with_message(
        kind: ErrorKind,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias for dictxml
pub type Result<T> = std::result::Result<T, Error>;
