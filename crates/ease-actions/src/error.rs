//! Error types for the action engine.
//!
//! None of these cross the engine's top-level entry point: registry and
//! extractor errors surface once at startup, handler and hook errors become failed
//! [`ActionResult`](ease_core::ActionResult)s at the dispatch boundary.

use thiserror::Error;

/// Errors raised while building or querying the action registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No schema registered under that name.
    #[error("schema not found: {name}")]
    SchemaNotFound { name: String },

    /// Two actions share a name.
    #[error("action {name} is already registered")]
    DuplicateAction { name: String },

    /// A schema declares the same parameter twice.
    #[error("action {action} declares parameter {parameter} more than once")]
    DuplicateParameter { action: String, parameter: String },

    /// An enum parameter has no allowed values.
    #[error("enum parameter {parameter} of action {action} has no values")]
    EmptyEnum { action: String, parameter: String },

    /// An action or parameter name is empty or contains characters that
    /// cannot appear in a call site.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}

/// Errors raised while configuring the call-site extractor.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The marker tag would make an ambiguous or empty header.
    #[error("invalid marker tag {tag:?}: expected ASCII letters, digits or '_'")]
    InvalidTag { tag: String },
}

/// Errors a persistence hook can report.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors a handler can return; each becomes "execution failed for <name>".
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A persistence hook rejected the record.
    #[error("persistence failed: {0}")]
    Persistence(#[from] HookError),

    /// A validated argument could not be interpreted.
    #[error("invalid argument {parameter}: {reason}")]
    InvalidArgument { parameter: String, reason: String },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
