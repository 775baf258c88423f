//! Editing session: a markup layer, its history, and the selection

use crate::{
    Action, ActionManager, CreateMarkup, DeleteMarkup, HistoryConfig, Result, SetPosition,
    SetRotation, SetSize, SetStyle, SetText,
};
use markup_model::{
    Markup, MarkupError, MarkupId, MarkupLayer, MarkupRegistry, MarkupStyle, Point, Size,
};

/// Drives markup edits through the history and keeps the selection in step.
///
/// Selection follows the history notifications: execute and redo select the
/// target they report, undo selects the target of the group that is now on
/// top of the undo stack, and a change without a target leaves the selection
/// alone. A selected markup that no longer exists is always deselected.
#[derive(Debug)]
pub struct EditSession {
    layer: MarkupLayer,
    history: ActionManager,
    selection: Option<MarkupId>,
}

impl EditSession {
    /// Create a session over an empty layer
    pub fn new(config: &HistoryConfig) -> Self {
        Self::with_layer(MarkupLayer::new(), config)
    }

    /// Create a session over existing markups, with empty history
    pub fn with_layer(layer: MarkupLayer, config: &HistoryConfig) -> Self {
        Self {
            layer,
            history: ActionManager::with_config(config),
            selection: None,
        }
    }

    pub fn layer(&self) -> &MarkupLayer {
        &self.layer
    }

    pub fn history(&self) -> &ActionManager {
        &self.history
    }

    /// Mutable access to the history, for registering listeners
    pub fn history_mut(&mut self) -> &mut ActionManager {
        &mut self.history
    }

    /// The selected markup, if any
    pub fn selection(&self) -> Option<MarkupId> {
        self.selection
    }

    /// Select an existing markup
    pub fn select(&mut self, id: MarkupId) -> Result<()> {
        if !self.layer.contains(id) {
            return Err(MarkupError::MarkupNotFound(id).into());
        }
        self.selection = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_undo_stack_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.history.is_redo_stack_empty()
    }

    /// Execute an action through the history
    pub fn execute(&mut self, action: Box<dyn Action>) -> Option<MarkupId> {
        let target_id = self.history.execute(action, &mut self.layer);
        self.follow(target_id);
        target_id
    }

    pub fn begin_action_group(&mut self) -> Result<()> {
        self.history.begin_action_group()
    }

    pub fn close_action_group(&mut self) -> Result<()> {
        self.history.close_action_group()
    }

    /// Abandon the open group and revert its edits
    pub fn cancel_action_group(&mut self) -> Result<()> {
        self.history.cancel_action_group(&mut self.layer)?;
        self.prune_selection();
        Ok(())
    }

    /// Undo the last step.
    ///
    /// Selects the markup implicated by the step now on top of the undo
    /// stack, or clears the selection when there is none.
    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.layer)?;

        self.selection = self
            .history
            .last_element_in_undo_stack()
            .and_then(|group| group.target_id())
            .filter(|id| self.layer.contains(*id));
        Ok(())
    }

    /// Redo the last undone step, selecting the markup it implicates
    pub fn redo(&mut self) -> Result<()> {
        let target_id = self.history.redo(&mut self.layer)?;
        self.follow(target_id);
        Ok(())
    }

    /// Forget all history; the layer and selection are kept
    pub fn clear(&mut self) {
        self.history.clear();
        self.prune_selection();
    }

    /// Add a markup.
    ///
    /// A markup whose id the layer has issued before, live or deleted, is
    /// given a fresh one so history never sees two entities under one id.
    /// Returns the id it was created under.
    pub fn create_markup(&mut self, mut markup: Markup) -> Result<MarkupId> {
        if self.layer.is_issued(markup.id) {
            let fresh = self.layer.allocate_id()?;
            tracing::debug!(requested = %markup.id, assigned = %fresh, "Markup id taken, reassigned");
            markup.id = fresh;
        }
        let id = markup.id;
        self.execute(Box::new(CreateMarkup::new(markup)));
        Ok(id)
    }

    pub fn delete_markup(&mut self, id: MarkupId) -> Result<()> {
        let action = DeleteMarkup::from_registry(&self.layer, id)?;
        self.execute(Box::new(action));
        Ok(())
    }

    /// Delete the selected markup; does nothing without a selection
    pub fn delete_selected(&mut self) -> Result<()> {
        match self.selection {
            Some(id) => self.delete_markup(id),
            None => Ok(()),
        }
    }

    pub fn move_markup(&mut self, id: MarkupId, to: Point) -> Result<()> {
        let action = SetPosition::from_markup(self.layer.get(id)?, to);
        self.execute(Box::new(action));
        Ok(())
    }

    pub fn resize_markup(&mut self, id: MarkupId, position: Point, size: Size) -> Result<()> {
        let action = SetSize::from_markup(self.layer.get(id)?, position, size);
        self.execute(Box::new(action));
        Ok(())
    }

    pub fn rotate_markup(&mut self, id: MarkupId, rotation: f64) -> Result<()> {
        let action = SetRotation::from_markup(self.layer.get(id)?, rotation);
        self.execute(Box::new(action));
        Ok(())
    }

    pub fn restyle_markup(&mut self, id: MarkupId, style: MarkupStyle) -> Result<()> {
        let action = SetStyle::from_markup(self.layer.get(id)?, style);
        self.execute(Box::new(action));
        Ok(())
    }

    pub fn set_markup_text(&mut self, id: MarkupId, text: impl Into<String>) -> Result<()> {
        let action = SetText::from_markup(self.layer.get(id)?, text);
        self.execute(Box::new(action));
        Ok(())
    }

    /// End a text-editing bracket on `id`.
    ///
    /// Closes the open group, or cancels it when the markup was left with
    /// blank text, so an abandoned text box leaves no trace in the layer or
    /// the history.
    pub fn finish_text_edit(&mut self, id: MarkupId) -> Result<()> {
        let blank = self.layer.get(id)?.is_blank();
        if blank {
            tracing::debug!(markup_id = %id, "Blank text edit discarded");
            self.cancel_action_group()
        } else {
            self.close_action_group()
        }
    }

    fn follow(&mut self, target_id: Option<MarkupId>) {
        match target_id {
            Some(id) if self.layer.contains(id) => self.selection = Some(id),
            _ => self.prune_selection(),
        }
    }

    fn prune_selection(&mut self) {
        if self.selection.is_some_and(|id| !self.layer.contains(id)) {
            self.selection = None;
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}
