//! Error types for the content engine.
//!
//! Everything here is recoverable: callers either fall back (catalogs), degrade
//! (media) or surface a retry notice (contact submission).

use std::path::PathBuf;

use thiserror::Error;

use crate::contact::ContactField;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("column span must be at least 1")]
    ZeroColumnSpan,

    #[error("row span must be at least 1")]
    ZeroRowSpan,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("project at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate project id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(ContactField),

    #[error("email address {0:?} is not valid")]
    InvalidEmail(String),

    #[error("a submission is already in flight")]
    Busy,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("outbox io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("delivery rejected: {0}")]
    Rejected(String),
}
