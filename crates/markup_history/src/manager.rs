//! Undo/redo manager with action grouping

use crate::{
    Action, ActionGroup, HistoryConfig, HistoryError, HistoryEvent, HistoryEventKind,
    HistoryListener, ListenerId, Result,
};
use markup_model::{MarkupId, MarkupRegistry};
use std::collections::VecDeque;
use std::fmt;

/// Owns the undo and redo stacks.
///
/// Every edit goes through [`execute`](Self::execute). Outside a bracket each
/// executed action becomes its own history step; between
/// [`begin_action_group`](Self::begin_action_group) and
/// [`close_action_group`](Self::close_action_group) all executed actions
/// accumulate into one group that is undone as a unit.
///
/// Misuse of the bracketing calls (opening twice, closing with nothing open)
/// is reported as an error and logged, and leaves all state untouched.
pub struct ActionManager {
    /// Groups that can be undone; the back is the most recent
    undo_stack: VecDeque<ActionGroup>,
    /// Groups that can be redone; the last is the most recently undone
    redo_stack: Vec<ActionGroup>,
    /// Maximum number of groups on the undo stack
    history_size: usize,
    /// Redo entries discarded by executes inside the open bracket, restored
    /// if the bracket is cancelled
    stashed_redo: Vec<ActionGroup>,
    listeners: Vec<(ListenerId, HistoryListener)>,
    next_listener_id: u64,
}

impl ActionManager {
    /// Create a manager keeping at most `history_size` undo steps.
    ///
    /// A size of zero is raised to one.
    pub fn new(history_size: usize) -> Self {
        if history_size == 0 {
            tracing::warn!("History size of 0 requested, keeping 1 step instead");
        }
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            history_size: history_size.max(1),
            stashed_redo: Vec::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Create a manager from a validated config
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self::new(config.history_size)
    }

    /// Apply an action now and record it.
    ///
    /// Clears the redo stack. The action joins the open group if there is
    /// one, otherwise it becomes a closed group of its own. Returns the
    /// target the execution implicates for selection, which is `None` when
    /// the action opts out of selecting.
    pub fn execute(
        &mut self,
        mut action: Box<dyn Action>,
        registry: &mut dyn MarkupRegistry,
    ) -> Option<MarkupId> {
        let discarded = std::mem::take(&mut self.redo_stack);

        action.redo(registry);
        let action_type = action.action_type();
        let target_id = action.select_on_execution().then(|| action.target_id()).flatten();

        match self.undo_stack.back_mut().filter(|group| group.is_open()) {
            Some(group) => {
                self.stashed_redo.extend(discarded);
                if let Err(rejected) = group.add_action(action) {
                    tracing::warn!(action = %rejected.action_type(), "Current action group is closed, action not recorded");
                }
            }
            None => {
                let group = ActionGroup::singleton(action);
                if group.is_empty() {
                    tracing::debug!(action = %action_type, "Edit had no effect, nothing recorded");
                } else {
                    self.undo_stack.push_back(group);
                    self.enforce_history_size();
                }
            }
        }

        self.emit(HistoryEvent::new(HistoryEventKind::Execute, target_id));
        target_id
    }

    /// Start collecting executed actions into one group
    pub fn begin_action_group(&mut self) -> Result<()> {
        if self.is_group_open() {
            tracing::warn!("Close the current action group before opening a new one");
            return Err(HistoryError::GroupAlreadyOpen);
        }

        self.undo_stack.push_back(ActionGroup::new_open());
        Ok(())
    }

    /// Finish the open group.
    ///
    /// A group that ended up empty (nothing executed, or every edit cancelled
    /// itself out) is dropped instead of becoming a history step.
    pub fn close_action_group(&mut self) -> Result<()> {
        let Some(group) = self.undo_stack.back_mut().filter(|group| group.is_open()) else {
            tracing::warn!("No open action group to close");
            return Err(HistoryError::NoOpenGroup);
        };

        group.close()?;
        if group.is_empty() {
            self.undo_stack.pop_back();
            tracing::debug!("Closed an empty action group, discarded");
        } else {
            self.enforce_history_size();
        }
        self.stashed_redo.clear();
        Ok(())
    }

    /// Abandon the open group, reverting everything executed since
    /// [`begin_action_group`](Self::begin_action_group).
    ///
    /// The group never reaches the redo stack, and redo entries discarded
    /// while it was open come back.
    pub fn cancel_action_group(&mut self, registry: &mut dyn MarkupRegistry) -> Result<()> {
        if !self.is_group_open() {
            tracing::warn!("No open action group to cancel");
            return Err(HistoryError::NoOpenGroup);
        }
        let Some(mut group) = self.undo_stack.pop_back() else {
            return Err(HistoryError::NoOpenGroup);
        };

        group.close()?;
        group.undo(registry);
        if !self.stashed_redo.is_empty() {
            self.redo_stack = std::mem::take(&mut self.stashed_redo);
        }

        self.emit(HistoryEvent::new(HistoryEventKind::Cancel, None));
        Ok(())
    }

    /// Undo the most recent group and move it to the redo stack.
    ///
    /// Returns the target the undo implicates.
    pub fn undo(&mut self, registry: &mut dyn MarkupRegistry) -> Result<Option<MarkupId>> {
        if self.is_group_open() {
            tracing::warn!("Cannot undo while an action group is open");
            return Err(HistoryError::GroupOpen);
        }
        let mut group = self.undo_stack.pop_back().ok_or(HistoryError::UndoStackEmpty)?;

        let target_id = group.undo(registry);
        self.redo_stack.push(group);

        self.emit(HistoryEvent::new(HistoryEventKind::Undo, target_id));
        Ok(target_id)
    }

    /// Redo the most recently undone group and move it back to the undo stack.
    ///
    /// Returns the target the redo implicates.
    pub fn redo(&mut self, registry: &mut dyn MarkupRegistry) -> Result<Option<MarkupId>> {
        if self.is_group_open() {
            tracing::warn!("Cannot redo while an action group is open");
            return Err(HistoryError::GroupOpen);
        }
        let mut group = self.redo_stack.pop().ok_or(HistoryError::RedoStackEmpty)?;

        let target_id = group.redo(registry);
        self.undo_stack.push_back(group);

        self.emit(HistoryEvent::new(HistoryEventKind::Redo, target_id));
        Ok(target_id)
    }

    /// Clear all undo/redo history, including an open group
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.stashed_redo.clear();
        self.emit(HistoryEvent::new(HistoryEventKind::Clear, None));
    }

    /// Check if there is nothing to undo
    pub fn is_undo_stack_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Check if there is nothing to redo
    pub fn is_redo_stack_empty(&self) -> bool {
        self.redo_stack.is_empty()
    }

    /// Peek at the group the next undo would revert
    pub fn last_element_in_undo_stack(&self) -> Option<&ActionGroup> {
        self.undo_stack.back()
    }

    /// Check if a bracket is in progress
    pub fn is_group_open(&self) -> bool {
        self.undo_stack.back().is_some_and(ActionGroup::is_open)
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn history_size(&self) -> usize {
        self.history_size
    }

    /// Undo step labels, most recent first
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(ActionGroup::description)
    }

    /// Redo step labels, most recent first
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(ActionGroup::description)
    }

    /// Register a callback for every history event
    pub fn add_listener(&mut self, listener: impl FnMut(&HistoryEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a callback; returns whether it was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Drop the oldest groups beyond the bound.
    ///
    /// Only called once the newest group is closed, so a cancelled bracket
    /// never costs an older step.
    fn enforce_history_size(&mut self) {
        while self.undo_stack.len() > self.history_size {
            self.undo_stack.pop_front();
            tracing::debug!(history_size = self.history_size, "Oldest history step dropped");
        }
    }

    fn emit(&mut self, event: HistoryEvent) {
        tracing::debug!(kind = %event.kind, target_id = ?event.target_id, "History changed");
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl Default for ActionManager {
    fn default() -> Self {
        Self::with_config(&HistoryConfig::default())
    }
}

impl fmt::Debug for ActionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionManager")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("history_size", &self.history_size)
            .field("group_open", &self.is_group_open())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
