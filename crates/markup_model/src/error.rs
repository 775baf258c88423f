//! Error types for markup model operations

use crate::MarkupId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("Markup not found: {0}")]
    MarkupNotFound(MarkupId),

    #[error("No markup ids left to allocate")]
    IdSpaceExhausted,

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, MarkupError>;
