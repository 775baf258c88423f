//! Markup Model - Drawing markups and the registry that owns them
//!
//! This crate provides the entity side of the markup editor: stable markup
//! ids, markup-space geometry, stroke/fill styles, the `Markup` entity itself,
//! and the registry contract edit actions use to resolve an id to a live
//! entity.

mod error;
mod geometry;
mod markup;
mod markup_id;
mod registry;
mod style;

pub use error::*;
pub use geometry::*;
pub use markup::*;
pub use markup_id::*;
pub use registry::*;
pub use style::*;
