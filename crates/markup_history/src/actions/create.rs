//! Markup creation

use crate::{Action, ActionType};
use markup_model::{Markup, MarkupId, MarkupKind, MarkupRegistry, MarkupStyle, Point, Size};

/// Register a new markup.
///
/// Holds a full snapshot of the markup to create. `redo` registers a copy of
/// it (replacing any markup already registered under the id, which keeps
/// repeated redo harmless); `undo` removes the markup by id.
#[derive(Debug, Clone)]
pub struct CreateMarkup {
    markup: Markup,
    select_on_execution: bool,
    description: String,
}

impl CreateMarkup {
    /// Create a markup from a full snapshot
    pub fn new(markup: Markup) -> Self {
        let description = format!("Create {}", markup.kind.display_name());
        Self {
            markup,
            select_on_execution: true,
            description,
        }
    }

    pub fn rectangle(id: MarkupId, position: Point, size: Size) -> Self {
        Self::new(Markup::rectangle(id, position, size))
    }

    pub fn circle(id: MarkupId, position: Point, size: Size) -> Self {
        Self::new(Markup::circle(id, position, size))
    }

    pub fn cloud(id: MarkupId, position: Point, size: Size) -> Self {
        Self::new(Markup::cloud(id, position, size))
    }

    pub fn text(id: MarkupId, position: Point, size: Size, text: impl Into<String>) -> Self {
        Self::new(Markup::text(id, position, size, text))
    }

    pub fn callout(id: MarkupId, position: Point, size: Size, text: impl Into<String>) -> Self {
        Self::new(Markup::callout(id, position, size, text))
    }

    /// Arrow between two absolute points
    pub fn arrow(id: MarkupId, tail: Point, head: Point) -> Self {
        Self::new(Markup::arrow(id, tail, head))
    }

    pub fn freehand(id: MarkupId, points: &[Point]) -> Self {
        Self::new(Markup::freehand(id, points))
    }

    pub fn highlight(id: MarkupId, points: &[Point]) -> Self {
        Self::new(Markup::highlight(id, points))
    }

    pub fn polyline(id: MarkupId, points: &[Point], closed: bool) -> Self {
        Self::new(Markup::polyline(id, points, closed))
    }

    pub fn polycloud(id: MarkupId, points: &[Point]) -> Self {
        Self::new(Markup::polycloud(id, points))
    }

    /// Set the style the markup is created with
    pub fn with_style(mut self, style: MarkupStyle) -> Self {
        self.markup.style = style;
        self
    }

    /// Control whether executing the creation selects the new markup.
    ///
    /// Drag-to-create tools turn this off so the shape being drawn does not
    /// take the selection until the drag ends.
    pub fn with_select_on_execution(mut self, select: bool) -> Self {
        self.select_on_execution = select;
        self
    }

    /// The snapshot this action registers
    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn kind(&self) -> MarkupKind {
        self.markup.kind
    }
}

impl Action for CreateMarkup {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        registry.insert(self.markup.clone());
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        if registry.remove(self.markup.id).is_none() {
            tracing::trace!(markup_id = %self.markup.id, "created markup already gone");
        }
    }

    fn action_type(&self) -> ActionType {
        ActionType::Create(self.markup.kind)
    }

    fn target_id(&self) -> Option<MarkupId> {
        Some(self.markup.id)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn select_on_execution(&self) -> bool {
        self.select_on_execution
    }
}
