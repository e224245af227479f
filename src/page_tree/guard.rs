//! Cycle and depth guard for page tree walks.

use std::collections::HashSet;

use crate::config::PageTreeConfig;
use crate::error::{Error, Result};
use crate::object::ObjectRef;

/// Tracks the dictionaries on the current walk path.
///
/// Only the active path is tracked, so a subtree shared by two parents is
/// walked twice rather than reported as a cycle.
#[derive(Debug)]
pub(crate) struct TraversalGuard {
    path: HashSet<ObjectRef>,
    max_depth: u32,
}

impl TraversalGuard {
    pub(crate) fn new(config: &PageTreeConfig) -> Self {
        Self {
            path: HashSet::new(),
            max_depth: config.max_depth,
        }
    }

    /// Step onto `node`, failing if it is already on the path or the path is too long.
    pub(crate) fn enter(&mut self, node: ObjectRef) -> Result<()> {
        if self.path.contains(&node) {
            log::warn!("Circular reference in page tree at object {}", node);
            return Err(Error::CircularReference(node));
        }
        if self.path.len() as u32 >= self.max_depth {
            log::warn!("Page tree depth exceeded {} levels at object {}", self.max_depth, node);
            return Err(Error::RecursionLimitExceeded(self.max_depth));
        }
        self.path.insert(node);
        Ok(())
    }

    pub(crate) fn leave(&mut self, node: ObjectRef) {
        self.path.remove(&node);
    }
}
