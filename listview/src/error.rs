//! Error types for list configuration.

use thiserror::Error;

use crate::record::RecordError;

/// Errors raised while building or reconfiguring a list view.
///
/// Runtime interaction never fails: malformed cells degrade to a placeholder
/// and unknown ids are ignored. Only configuration is validated.
#[derive(Debug, Error)]
pub enum ListViewError {
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),
    #[error("default visible column is not declared: {0}")]
    UnknownDefaultColumn(String),
    #[error("duplicate filter definition id: {0}")]
    DuplicateFilter(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Record(#[from] RecordError),
}
