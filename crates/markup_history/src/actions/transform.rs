//! Move, resize, rotate, and reshape actions
//!
//! These are the continuously adjustable properties: a drag emits one action
//! per mouse sample, and every one of them merges into the first action of
//! its kind for the same markup.

use super::edit_target;
use crate::{Action, ActionType};
use markup_model::{approx_eq, Markup, MarkupGeometry, MarkupId, MarkupRegistry, Point, Size};

// =============================================================================
// Position
// =============================================================================

/// Move a markup
#[derive(Debug, Clone)]
pub struct SetPosition {
    pub target: MarkupId,
    pub old_position: Point,
    pub new_position: Point,
}

impl SetPosition {
    pub fn new(target: MarkupId, old_position: Point, new_position: Point) -> Self {
        Self {
            target,
            old_position,
            new_position,
        }
    }

    /// Move `markup` from where it is now
    pub fn from_markup(markup: &Markup, new_position: Point) -> Self {
        Self::new(markup.id, markup.position, new_position)
    }
}

impl Action for SetPosition {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        let position = self.new_position;
        edit_target(registry, self.target, self.action_type(), |m| m.position = position);
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        let position = self.old_position;
        edit_target(registry, self.target, self.action_type(), |m| m.position = position);
    }

    fn action_type(&self) -> ActionType {
        ActionType::SetPosition
    }

    fn target_id(&self) -> Option<MarkupId> {
        Some(self.target)
    }

    fn description(&self) -> &str {
        "Move Markup"
    }

    fn merge(&mut self, candidate: &dyn Action) -> bool {
        match candidate.as_any().downcast_ref::<SetPosition>() {
            Some(other) if other.target == self.target => {
                self.new_position = other.new_position;
                true
            }
            _ => false,
        }
    }

    fn is_identity(&self) -> bool {
        self.old_position.approx_eq(&self.new_position)
    }
}

// =============================================================================
// Size
// =============================================================================

/// Resize a markup.
///
/// Dragging a corner handle moves the center as well as the size, so both
/// are captured together.
#[derive(Debug, Clone)]
pub struct SetSize {
    pub target: MarkupId,
    pub old_position: Point,
    pub old_size: Size,
    pub new_position: Point,
    pub new_size: Size,
}

impl SetSize {
    pub fn new(
        target: MarkupId,
        (old_position, old_size): (Point, Size),
        (new_position, new_size): (Point, Size),
    ) -> Self {
        Self {
            target,
            old_position,
            old_size,
            new_position,
            new_size,
        }
    }

    /// Resize `markup` from its current bounds
    pub fn from_markup(markup: &Markup, new_position: Point, new_size: Size) -> Self {
        Self::new(markup.id, (markup.position, markup.size), (new_position, new_size))
    }
}

impl Action for SetSize {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        let (position, size) = (self.new_position, self.new_size);
        edit_target(registry, self.target, self.action_type(), |m| {
            m.position = position;
            m.size = size;
        });
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        let (position, size) = (self.old_position, self.old_size);
        edit_target(registry, self.target, self.action_type(), |m| {
            m.position = position;
            m.size = size;
        });
    }

    fn action_type(&self) -> ActionType {
        ActionType::SetSize
    }

    fn target_id(&self) -> Option<MarkupId> {
        Some(self.target)
    }

    fn description(&self) -> &str {
        "Resize Markup"
    }

    fn merge(&mut self, candidate: &dyn Action) -> bool {
        match candidate.as_any().downcast_ref::<SetSize>() {
            Some(other) if other.target == self.target => {
                self.new_position = other.new_position;
                self.new_size = other.new_size;
                true
            }
            _ => false,
        }
    }

    fn is_identity(&self) -> bool {
        self.old_position.approx_eq(&self.new_position) && self.old_size.approx_eq(&self.new_size)
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Rotate a markup around its center
#[derive(Debug, Clone)]
pub struct SetRotation {
    pub target: MarkupId,
    /// Radians
    pub old_rotation: f64,
    pub new_rotation: f64,
}

impl SetRotation {
    pub fn new(target: MarkupId, old_rotation: f64, new_rotation: f64) -> Self {
        Self {
            target,
            old_rotation,
            new_rotation,
        }
    }

    pub fn from_markup(markup: &Markup, new_rotation: f64) -> Self {
        Self::new(markup.id, markup.rotation, new_rotation)
    }
}

impl Action for SetRotation {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        let rotation = self.new_rotation;
        edit_target(registry, self.target, self.action_type(), |m| m.rotation = rotation);
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        let rotation = self.old_rotation;
        edit_target(registry, self.target, self.action_type(), |m| m.rotation = rotation);
    }

    fn action_type(&self) -> ActionType {
        ActionType::SetRotation
    }

    fn target_id(&self) -> Option<MarkupId> {
        Some(self.target)
    }

    fn description(&self) -> &str {
        "Rotate Markup"
    }

    fn merge(&mut self, candidate: &dyn Action) -> bool {
        match candidate.as_any().downcast_ref::<SetRotation>() {
            Some(other) if other.target == self.target => {
                self.new_rotation = other.new_rotation;
                true
            }
            _ => false,
        }
    }

    fn is_identity(&self) -> bool {
        approx_eq(self.old_rotation, self.new_rotation)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Everything a reshape touches: arrow endpoints or path vertices, plus the
/// bounds that enclose them
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryState {
    pub position: Point,
    pub size: Size,
    pub geometry: MarkupGeometry,
}

impl GeometryState {
    /// Capture the current shape of a markup
    pub fn capture(markup: &Markup) -> Self {
        Self {
            position: markup.position,
            size: markup.size,
            geometry: markup.geometry.clone(),
        }
    }

    fn apply(&self, markup: &mut Markup) {
        markup.position = self.position;
        markup.size = self.size;
        markup.geometry = self.geometry.clone();
    }

    pub fn approx_eq(&self, other: &GeometryState) -> bool {
        self.position.approx_eq(&other.position)
            && self.size.approx_eq(&other.size)
            && self.geometry.approx_eq(&other.geometry)
    }
}

/// Reshape an arrow or path markup (move an endpoint, drag a vertex)
#[derive(Debug, Clone)]
pub struct SetGeometry {
    pub target: MarkupId,
    pub old_state: GeometryState,
    pub new_state: GeometryState,
}

impl SetGeometry {
    pub fn new(target: MarkupId, old_state: GeometryState, new_state: GeometryState) -> Self {
        Self {
            target,
            old_state,
            new_state,
        }
    }

    /// Reshape `markup` into the shape of `reshaped`, which is usually a
    /// clone of it edited by a tool
    pub fn from_markups(markup: &Markup, reshaped: &Markup) -> Self {
        Self::new(markup.id, GeometryState::capture(markup), GeometryState::capture(reshaped))
    }
}

impl Action for SetGeometry {
    fn redo(&mut self, registry: &mut dyn MarkupRegistry) {
        let state = &self.new_state;
        edit_target(registry, self.target, ActionType::SetGeometry, |m| state.apply(m));
    }

    fn undo(&mut self, registry: &mut dyn MarkupRegistry) {
        let state = &self.old_state;
        edit_target(registry, self.target, ActionType::SetGeometry, |m| state.apply(m));
    }

    fn action_type(&self) -> ActionType {
        ActionType::SetGeometry
    }

    fn target_id(&self) -> Option<MarkupId> {
        Some(self.target)
    }

    fn description(&self) -> &str {
        "Reshape Markup"
    }

    fn merge(&mut self, candidate: &dyn Action) -> bool {
        match candidate.as_any().downcast_ref::<SetGeometry>() {
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
