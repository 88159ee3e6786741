//! Error types for stream extraction and translation.
//!
//! Everything the library can fail on is a data problem in the input: a
//! translated message whose shape does not match its source, a directive
//! with bad parameters, or an expression that does not parse. None of these
//! are I/O errors, so the CLI layer wraps them with `anyhow` context.

use thiserror::Error;

/// Errors raised while extracting or translating a markup stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// Translated message has unbalanced `[N:` / `]` brackets.
    #[error("malformed message {message:?}: {reason}")]
    MalformedMessage { message: String, reason: String },

    /// Translated message references a `[N:` block the source never had.
    #[error("translation references unknown placeholder block {order}")]
    UnknownPlaceholder { order: usize },

    /// Translated message references a `%(name)s` the source never had.
    #[error("translation references unknown parameter %({name})s")]
    UnknownParameter { name: String },

    /// A `msg` region contains more expressions than declared parameters.
    #[error("not enough parameters declared for message on line {line}: {params:?}")]
    MissingParameter { line: usize, params: Vec<String> },

    /// Domain lookup requested from a plain translation function.
    #[error("domain {domain:?} requested but the translation function has no domain support")]
    DomainUnsupported { domain: String },

    /// Embedded expression source failed to parse.
    #[error("invalid expression {code:?}: {reason}")]
    InvalidCode { code: String, reason: String },

    /// Directive value could not be interpreted.
    #[error("invalid directive {name:?}: {reason}")]
    InvalidDirective { name: String, reason: String },
}

pub type Result<T, E = I18nError> = std::result::Result<T, E>;
