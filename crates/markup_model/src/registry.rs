//! Target registry contract and the in-memory markup layer

use crate::{Markup, MarkupError, MarkupId, Result};
use std::collections::BTreeMap;

/// Resolves markup ids to live markups.
///
/// Edit actions hold ids, never references, and go through the registry every
/// time they replay. A markup that was removed (and possibly recreated under
/// the same id) between recording and replay is therefore always looked up
/// fresh.
pub trait MarkupRegistry {
    /// Look up a markup by id
    fn resolve(&self, id: MarkupId) -> Option<&Markup>;

    /// Look up a markup by id for mutation
    fn resolve_mut(&mut self, id: MarkupId) -> Option<&mut Markup>;

    /// Register a markup under its own id, replacing any markup already
    /// registered with that id. Returns the replaced markup.
    fn insert(&mut self, markup: Markup) -> Option<Markup>;

    /// Unregister a markup, returning it if it existed
    fn remove(&mut self, id: MarkupId) -> Option<Markup>;

    /// Check whether an id currently resolves
    fn contains(&self, id: MarkupId) -> bool {
        self.resolve(id).is_some()
    }
}

/// Ordered in-memory collection of markups
#[derive(Debug, Clone)]
pub struct MarkupLayer {
    markups: BTreeMap<MarkupId, Markup>,
    /// Lowest id never issued; `None` once `u64::MAX` has been issued
    next_id: Option<u64>,
}

impl MarkupLayer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self {
            markups: BTreeMap::new(),
            next_id: Some(0),
        }
    }

    /// Reserve a fresh id that no markup in this layer has used
    pub fn allocate_id(&mut self) -> Result<MarkupId> {
        let raw = self.next_id.ok_or(MarkupError::IdSpaceExhausted)?;
        self.next_id = raw.checked_add(1);
        Ok(MarkupId::new(raw))
    }

    /// Whether an id has been allocated or registered in this layer before,
    /// even if the markup has since been removed
    pub fn is_issued(&self, id: MarkupId) -> bool {
        self.next_id.map_or(true, |next| id.get() < next)
    }

    /// Number of markups in the layer
    pub fn len(&self) -> usize {
        self.markups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markups.is_empty()
    }

    /// Iterate over markups in id order
    pub fn iter(&self) -> impl Iterator<Item = &Markup> {
        self.markups.values()
    }

    /// Ids of all markups in id order
    pub fn ids(&self) -> Vec<MarkupId> {
        self.markups.keys().copied().collect()
    }

    /// Get a markup, failing if it does not exist
    pub fn get(&self, id: MarkupId) -> Result<&Markup> {
        self.markups.get(&id).ok_or(MarkupError::MarkupNotFound(id))
    }
}

impl Default for MarkupLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupRegistry for MarkupLayer {
    fn resolve(&self, id: MarkupId) -> Option<&Markup> {
        self.markups.get(&id)
    }

    fn resolve_mut(&mut self, id: MarkupId) -> Option<&mut Markup> {
        self.markups.get_mut(&id)
    }

    fn insert(&mut self, markup: Markup) -> Option<Markup> {
        // Keep allocation ahead of ids registered from outside
        let raw = markup.id.get();
        if self.next_id.is_some_and(|next| raw >= next) {
            self.next_id = raw.checked_add(1);
        }
        self.markups.insert(markup.id, markup)
    }

    fn remove(&mut self, id: MarkupId) -> Option<Markup> {
        self.markups.remove(&id)
    }
}
