//! Text editing action

use super::edit_target;
use crate::{Action, ActionType};
use markup_model::{Markup, MarkupId, MarkupRegistry, Point, Size};

/// Text content together with the box that holds it
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    pub text: String,
    pub position: Point,
    pub size: Size,
}

impl TextState {
    pub fn new(text: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            text: text.into(),
            position,
            size,
        }
    }

    pub fn capture(markup: &Markup) -> Self {
        Self::new(markup.text.clone(), markup.position, markup.size)
    }

    fn apply(&self, markup: &mut Markup) {
        markup.text = self.text.clone();
        markup.position = self.position;
        markup.size = self.size;
    }

    pub fn approx_eq(&self, other: &TextState) -> bool {
        self.text == other.text
            && self.position.approx_eq(&other.position)
            && self.size.approx_eq(&other.size)
    }
}

/// Change the text of a text or callout markup.
///
/// The text box grows as the user types, so the bounds are captured with
/// the text. Keystrokes of one editing session merge into one step.
#[derive(Debug, Clone)]
pub struct SetText {
    pub target: MarkupId,
    pub old_state: TextState,
    pub new_state: TextState,
}

impl SetText {
    pub fn new(target: MarkupId, old_state: TextState, new_state: TextState) -> Self {
        Self {
            target,
            old_state,
            new_state,
        }
    }

    /// Replace the text of `markup`, keeping its box
    pub fn from_markup(markup: &Markup, text: impl Into<String>) -> Self {
        let old_state = TextState::capture(markup);
        let new_state = TextState::new(text, markup.position, markup.size);
        Self::new(markup.id, old_state, new_state)
    }
}

impl Action for SetText {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        let state = &self.new_state;
        edit_target(registry, self.target, ActionType::SetText, |m| state.apply(m));
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        let state = &self.old_state;
        edit_target(registry, self.target, ActionType::SetText, |m| state.apply(m));
    }

    fn action_type(&self) -> ActionType {
        ActionType::SetText
    }

    fn target_id(&self) -> Option<MarkupId> {
        Some(self.target)
    }

    fn description(&self) -> &str {
        "Edit Text"
    }

    fn merge(&mut self, candidate: &dyn Action) -> bool {
        match candidate.as_any().downcast_ref::<SetText>() {
            Some(other) if other.target == self.target => {
                self.new_state = other.new_state.clone();
                true
            }
            _ => false,
        }
    }

    fn is_identity(&self) -> bool {
        self.old_state.approx_eq(&self.new_state)
    }
}
