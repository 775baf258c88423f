//! Markup deletion

use crate::{Action, ActionType, CreateMarkup, Result};
use markup_model::{Markup, MarkupError, MarkupId, MarkupRegistry};

/// Remove a markup.
///
/// Built from the live markup: it owns a [`CreateMarkup`] initialised from
/// the markup's current state and runs it backwards, so a delete and its
/// undo are exactly the inverse pair of a create.
#[derive(Debug, Clone)]
pub struct DeleteMarkup {
    create: CreateMarkup,
    description: String,
}

impl DeleteMarkup {
    /// Delete the given markup, capturing its current state
    pub fn new(markup: &Markup) -> Self {
        Self {
            create: CreateMarkup::new(markup.clone()),
            description: format!("Delete {}", markup.kind.display_name()),
        }
    }

    /// Delete the markup registered under `id`
    pub fn from_registry(registry: &dyn MarkupRegistry, id: MarkupId) -> Result<Self> {
        let markup = registry.resolve(id).ok_or(MarkupError::MarkupNotFound(id))?;
        Ok(Self::new(markup))
    }

    /// The state the markup is restored to on undo
    pub fn markup(&self) -> &Markup {
        self.create.markup()
    }
}

impl Action for DeleteMarkup {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        self.create.undo(registry);
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        self.create.redo(registry);
    }

    fn action_type(&self) -> ActionType {
        ActionType::Delete(self.create.kind())
    }

    fn target_id(&self) -> Option<MarkupId> {
        self.create.target_id()
    }

    fn description(&self) -> &str {
        &self.description
    }

    // The target is gone after execution, there is nothing to select
    fn select_on_execution(&self) -> bool {
        false
    }
}
