//! Restyle action

use super::edit_target;
use crate::{Action, ActionType};
use markup_model::{Markup, MarkupId, MarkupRegistry, MarkupStyle};

/// Replace a markup's style.
///
/// Style changes come from discrete picks in a panel, so they never merge;
/// each pick is its own step.
#[derive(Debug, Clone)]
pub struct SetStyle {
    pub target: MarkupId,
    pub old_style: MarkupStyle,
    pub new_style: MarkupStyle,
}

impl SetStyle {
    pub fn new(target: MarkupId, old_style: MarkupStyle, new_style: MarkupStyle) -> Self {
        Self {
            target,
            old_style,
            new_style,
        }
    }

    pub fn from_markup(markup: &Markup, new_style: MarkupStyle) -> Self {
        Self::new(markup.id, markup.style.clone(), new_style)
    }
}

impl Action for SetStyle {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        let style = &self.new_style;
        edit_target(registry, self.target, ActionType::SetStyle, |m| m.style = style.clone());
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        let style = &self.old_style;
        edit_target(registry, self.target, ActionType::SetStyle, |m| m.style = style.clone());
    }

    fn action_type(&self) -> ActionType {
        ActionType::SetStyle
    }

    fn target_id(&self) -> Option<MarkupId> {
        Some(self.target)
    }

    fn description(&self) -> &str {
        "Change Style"
    }

    fn is_identity(&self) -> bool {
        self.old_style.approx_eq(&self.new_style)
    }
}
