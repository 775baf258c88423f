//! The reversible action contract
//!
//! An [`Action`] is one atomic, reversible edit to a single markup. It holds
//! the target's id and paired old/new snapshots of whatever it changes, and
//! replays either side on request. Actions never touch the history stacks;
//! ordering, grouping, and merging are the manager's and group's job.

use markup_model::{MarkupId, MarkupKind, MarkupRegistry};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Helper trait for downcasting trait objects to concrete types.
///
/// Implemented for every `'static` type. [`Action::merge`] uses it to look
/// at the concrete type of a merge candidate.
pub trait AsAny: 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Type tag identifying the kind of edit an action performs.
///
/// Group compaction only ever tries to merge actions whose tags are equal,
/// and never across an action on the same target that
/// [overlaps](Self::overlaps) them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Create(MarkupKind),
    Delete(MarkupKind),
    SetPosition,
    SetSize,
    SetRotation,
    SetStyle,
    SetText,
    SetGeometry,
}

mod field {
    pub const POSITION: u8 = 1 << 0;
    pub const SIZE: u8 = 1 << 1;
    pub const ROTATION: u8 = 1 << 2;
    pub const STYLE: u8 = 1 << 3;
    pub const TEXT: u8 = 1 << 4;
    pub const GEOMETRY: u8 = 1 << 5;
    pub const ALL: u8 = u8::MAX;
}

impl ActionType {
    /// Whether two kinds of edit write at least one common markup field.
    ///
    /// Edits of the same target that do not overlap commute, so a later
    /// edit may be folded into an earlier one across them.
    pub fn overlaps(self, other: ActionType) -> bool {
        self.fields() & other.fields() != 0
    }

    fn fields(self) -> u8 {
        match self {
            ActionType::Create(_) | ActionType::Delete(_) => field::ALL,
            ActionType::SetPosition => field::POSITION,
            ActionType::SetSize => field::POSITION | field::SIZE,
            ActionType::SetRotation => field::ROTATION,
            ActionType::SetStyle => field::STYLE,
            ActionType::SetText => field::TEXT | field::POSITION | field::SIZE,
            ActionType::SetGeometry => field::GEOMETRY | field::POSITION | field::SIZE,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Create(kind) => write!(f, "CREATE-{}", kind.tag()),
            ActionType::Delete(kind) => write!(f, "DELETE-{}", kind.tag()),
            ActionType::SetPosition => f.write_str("SET-POSITION"),
            ActionType::SetSize => f.write_str("SET-SIZE"),
            ActionType::SetRotation => f.write_str("SET-ROTATION"),
            ActionType::SetStyle => f.write_str("SET-STYLE"),
            ActionType::SetText => f.write_str("SET-TEXT"),
            ActionType::SetGeometry => f.write_str("SET-GEOMETRY"),
        }
    }
}

/// A reversible markup edit (Command pattern).
///
/// # Replay
///
/// `redo` applies the "new" snapshot and `undo` the "old" one. Both resolve
/// the target through the registry on every call and do nothing when it no
/// longer exists, since an unrelated edit may have removed it between
/// recording and replay. `redo` must be idempotent: calling it twice without
/// an `undo` in between leaves the target as calling it once does.
///
/// # Merging
///
/// Actions for continuously adjustable properties override
/// [`merge`](Self::merge): when the candidate has the same type and target,
/// `self` keeps its own "old" snapshot, takes the candidate's "new" one, and
/// reports success. Use [`AsAny::as_any`] on the candidate to reach its
/// concrete type.
pub trait Action: fmt::Debug + AsAny {
    /// Apply the "new" state to the target
    fn redo(&mut self, registry: &mut dyn MarkupRegistry);

    /// Apply the "old" state to the target
    fn undo(&mut self, registry: &mut dyn MarkupRegistry);

    /// Tag identifying the kind of edit
    fn action_type(&self) -> ActionType;

    /// The markup this action affects, or `None` when the action does not
    /// imply a selection
    fn target_id(&self) -> Option<MarkupId>;

    /// Display name for history menus ("Move Markup", "Create Rectangle")
    fn description(&self) -> &str;

    /// Whether executing this action should select its target.
    ///
    /// Default: `true`.
    fn select_on_execution(&self) -> bool {
        true
    }

    /// Try to absorb `candidate`, a later action of the same type.
    ///
    /// Default: `false` (never merges).
    fn merge(&mut self, _candidate: &dyn Action) -> bool {
        false
    }

    /// Whether applying this action changes nothing observable.
    ///
    /// Default: `false`.
    fn is_identity(&self) -> bool {
        false
    }
}

impl<'a> dyn Action + 'a {
    /// Downcast to a concrete action type
    pub fn downcast_ref<T: Action>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
