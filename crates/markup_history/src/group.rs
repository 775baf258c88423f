//! Action groups: one undo/redo step per user interaction

use crate::{Action, HistoryError, Result};
use markup_model::{MarkupId, MarkupRegistry};

/// An ordered batch of actions undone and redone as one step.
///
/// A group accepts actions only while open. Every accepted action triggers
/// compaction: identity actions are dropped and later actions are folded into
/// earlier ones of the same type when they merge, so that a drag made of many
/// incremental moves ends up as a single move. A fold never crosses an
/// action on the same target that writes an overlapping field, since moving
/// an edit past it would change the result of replay.
#[derive(Debug)]
pub struct ActionGroup {
    actions: Vec<Box<dyn Action>>,
    closed: bool,
}

impl ActionGroup {
    /// Create an empty, closed group
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            closed: true,
        }
    }

    /// Create an empty group that already accepts actions
    pub fn new_open() -> Self {
        Self {
            actions: Vec::new(),
            closed: false,
        }
    }

    /// Create a closed group holding one action, compacted.
    ///
    /// The group is empty when the action is an identity.
    pub fn singleton(action: Box<dyn Action>) -> Self {
        let mut actions = vec![action];
        actions.retain(|action| !action.is_identity());
        Self {
            actions,
            closed: true,
        }
    }

    /// Open the group for new actions
    pub fn open(&mut self) -> Result<()> {
        if !self.closed {
            return Err(HistoryError::GroupAlreadyOpen);
        }
        self.closed = false;
        Ok(())
    }

    /// Close the group, finalizing it for replay
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(HistoryError::GroupAlreadyClosed);
        }
        self.closed = true;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of actions that survived compaction
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Append an action and compact the group.
    ///
    /// A closed group rejects the action and hands it back.
    pub fn add_action(&mut self, action: Box<dyn Action>) -> std::result::Result<(), Box<dyn Action>> {
        if self.closed {
            return Err(action);
        }
        self.actions.push(action);
        self.compact();
        Ok(())
    }

    /// Undo every action, last added first.
    ///
    /// Returns the last target seen in that order, which is the earliest
    /// action in the group that has one.
    pub fn undo(&mut self, registry: &mut dyn MarkupRegistry) -> Option<MarkupId> {
        let mut target_id = None;
        for action in self.actions.iter_mut().rev() {
            tracing::trace!(action = %action.action_type(), "undo");
            action.undo(registry);
            if let Some(id) = action.target_id() {
                target_id = Some(id);
            }
        }
        target_id
    }

    /// Redo every action in insertion order.
    ///
    /// Returns the last target seen, which is the latest action in the group
    /// that has one.
    pub fn redo(&mut self, registry: &mut dyn MarkupRegistry) -> Option<MarkupId> {
        let mut target_id = None;
        for action in self.actions.iter_mut() {
            tracing::trace!(action = %action.action_type(), "redo");
            action.redo(registry);
            if let Some(id) = action.target_id() {
                target_id = Some(id);
            }
        }
        target_id
    }

    /// The target a redo of this group would report, without replaying it
    pub fn target_id(&self) -> Option<MarkupId> {
        self.actions.iter().rev().find_map(|action| action.target_id())
    }

    /// Iterate over the actions in insertion order
    pub fn actions(&self) -> impl Iterator<Item = &(dyn Action + 'static)> {
        self.actions.iter().map(|action| action.as_ref())
    }

    /// Label for history menus: the first action's description
    pub fn description(&self) -> &str {
        self.actions.first().map_or("", |action| action.description())
    }

    /// Drop identity actions and merge mergeable ones until neither applies.
    ///
    /// Quadratic in the group size, which is bounded by one interaction.
    fn compact(&mut self) {
        loop {
            self.actions.retain(|action| !action.is_identity());
            if !self.merge_pass() {
                break;
            }
        }
    }

    /// Fold each action's first mergeable successor into it.
    ///
    /// The scan for a successor stops at the first other action on the same
    /// target whose fields overlap. After a successful merge the scan stays on
    /// the same action, since it may now absorb the next successor too.
    /// Returns whether anything merged.
    fn merge_pass(&mut self) -> bool {
        let mut merged_any = false;
        let mut i = 0;
        while i < self.actions.len() {
            let action_type = self.actions[i].action_type();
            let target_id = self.actions[i].target_id();
            let mut absorbed = None;
            for j in (i + 1)..self.actions.len() {
                let candidate_type = self.actions[j].action_type();
                if candidate_type == action_type {
                    let (head, tail) = self.actions.split_at_mut(j);
                    if head[i].merge(tail[0].as_ref()) {
                        absorbed = Some(j);
                        break;
                    }
                }
                let same_target = self.actions[j].target_id() == target_id;
                if same_target && candidate_type.overlaps(action_type) {
                    break;
                }
            }

            match absorbed {
                Some(j) => {
                    self.actions.remove(j);
                    merged_any = true;
                }
                None => i += 1,
            }
        }
        merged_any
    }
}

impl Default for ActionGroup {
    fn default() -> Self {
        Self::new()
    }
}
