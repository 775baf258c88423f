//! Concrete markup actions
//!
//! - [`CreateMarkup`] / [`DeleteMarkup`] add and remove whole markups; a
//!   delete is the structural inverse of the create it owns.
//! - `Set*` actions change one property group of an existing markup and keep
//!   the old and new values side by side.

mod create;
mod delete;
mod style;
mod text;
mod transform;

pub use create::*;
pub use delete::*;
pub use style::*;
pub use text::*;
pub use transform::*;

use crate::ActionType;
use markup_model::{Markup, MarkupId, MarkupRegistry};

/// Run `edit` on the target if it still resolves
pub(crate) fn edit_target(
    registry: &mut dyn MarkupRegistry,
    target: MarkupId,
    action_type: ActionType,
    edit: impl FnOnce(&mut Markup),
) {
    match registry.resolve_mut(target) {
        Some(markup) => edit(markup),
        None => tracing::trace!(markup_id = %target, %action_type, "target no longer exists, skipping"),
    }
}
