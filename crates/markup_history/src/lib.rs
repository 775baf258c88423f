//! Markup History - Transactional undo/redo for markup editing
//!
//! Every markup edit is an [`Action`]. Actions are executed through an
//! [`ActionManager`], which records them in [`ActionGroup`]s: one group per
//! user interaction, compacted as it grows so that a drag made of hundreds of
//! incremental moves undoes in a single step.
//!
//! [`EditSession`] pairs a manager with a [`markup_model::MarkupLayer`] and
//! keeps the current selection in step with history notifications.

mod action;
pub mod actions;
mod config;
mod error;
mod event;
mod group;
mod manager;
mod session;

pub use action::*;
pub use actions::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use group::*;
pub use manager::*;
pub use session::*;
