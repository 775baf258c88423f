//! History change notifications

use markup_model::MarkupId;
use serde::{Deserialize, Serialize};

/// What changed the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryEventKind {
    Execute,
    Undo,
    Redo,
    Cancel,
    Clear,
}

impl std::fmt::Display for HistoryEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HistoryEventKind::Execute => "execute",
            HistoryEventKind::Undo => "undo",
            HistoryEventKind::Redo => "redo",
            HistoryEventKind::Cancel => "cancel",
            HistoryEventKind::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Notification emitted after every history change.
///
/// `target_id` is the markup the change implicates for selection purposes;
/// `None` means the event carries no selection hint and should be ignored by
/// selection logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub kind: HistoryEventKind,
    pub target_id: Option<MarkupId>,
}

impl HistoryEvent {
    pub fn new(kind: HistoryEventKind, target_id: Option<MarkupId>) -> Self {
        Self { kind, target_id }
    }
}

/// Handle returned when registering a history listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Callback invoked with every history event
pub type HistoryListener = Box<dyn FnMut(&HistoryEvent)>;
