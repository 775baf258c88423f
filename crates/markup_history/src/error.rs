//! Error types for history operations

use thiserror::Error;

/// Reasons a history operation was refused.
///
/// A refused operation never changes any state, so callers that do not care
/// about the reason can ignore the error.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("An action group is already open")]
    GroupAlreadyOpen,

    #[error("The action group is already closed")]
    GroupAlreadyClosed,

    #[error("No open action group")]
    NoOpenGroup,

    #[error("Cannot replay history while an action group is open")]
    GroupOpen,

    #[error("Undo stack is empty")]
    UndoStackEmpty,

    #[error("Redo stack is empty")]
    RedoStackEmpty,

    #[error("Markup model error: {0}")]
    Markup(#[from] markup_model::MarkupError),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors raised while building a [`HistoryConfig`](crate::HistoryConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("History size must be at least 1, got {0}")]
    InvalidHistorySize(usize),

    #[error("Failed to parse history config: {0}")]
    Parse(#[from] serde_json::Error),
}
