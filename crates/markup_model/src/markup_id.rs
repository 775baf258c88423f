//! Markup ID generation and management

use serde::{Deserialize, Serialize};

/// Unique identifier for a markup inside a layer.
///
/// Ids are plain integers handed out by the owning registry. The absence of a
/// target is expressed as `Option<MarkupId>::None` rather than a reserved
/// numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkupId(u64);

impl MarkupId {
    /// Create a MarkupId from a raw value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MarkupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MarkupId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<MarkupId> for u64 {
    fn from(id: MarkupId) -> Self {
        id.0
    }
}
