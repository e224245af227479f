//! Editable view over a node's /Kids array.

use super::node::PageTreeNode;
use super::KIDS;
use crate::error::{Error, Result};
use crate::store::ObjectStore;

/// The children of a grouping node as an ordered, editable list.
///
/// The view keeps the materialized handles index-aligned with the backing
/// /Kids array: every edit writes the array in the store and the handle list
/// in the same call. Edits touch neither /Count nor the children's /Parent.
///
/// # Example
///
/// ```
/// use pdf_page_tree::page_tree::PageTreeNode;
/// use pdf_page_tree::store::ObjectStore;
///
/// # fn main() -> pdf_page_tree::Result<()> {
/// let mut store = ObjectStore::new();
/// let root = PageTreeNode::new_pages(&mut store)?;
/// let first = PageTreeNode::new_page(&mut store)?;
/// let second = PageTreeNode::new_page(&mut store)?;
///
/// let mut kids = root.kids(&mut store)?;
/// kids.push(second)?;
/// kids.insert(0, first)?;
/// assert_eq!(kids.to_vec(), vec![first, second]);
///
/// assert_eq!(root.children(&store)?, vec![first, second]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Kids<'a> {
    store: &'a mut ObjectStore,
    owner: PageTreeNode,
    items: Vec<PageTreeNode>,
}

impl<'a> Kids<'a> {
    pub(crate) fn new(store: &'a mut ObjectStore, owner: PageTreeNode) -> Result<Self> {
        let items = owner.children(store)?;
        Ok(Self {
            store,
            owner,
            items,
        })
    }

    /// The node whose /Kids this view edits.
    pub fn owner(&self) -> PageTreeNode {
        self.owner
    }

    /// Read access to the store while the view is held.
    pub fn store(&self) -> &ObjectStore {
        &*self.store
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no children.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Child at `index`.
    pub fn get(&self, index: usize) -> Option<PageTreeNode> {
        self.items.get(index).copied()
    }

    /// Index of the first child backed by the same dictionary as `node`.
    pub fn position(&self, node: PageTreeNode) -> Option<usize> {
        self.items
            .iter()
            .position(|kid| kid.dict_ref() == node.dict_ref())
    }

    /// Iterate over the children in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageTreeNode> {
        self.items.iter()
    }

    /// The children as a slice.
    pub fn as_slice(&self) -> &[PageTreeNode] {
        &self.items
    }

    /// Copy the children out.
    pub fn to_vec(&self) -> Vec<PageTreeNode> {
        self.items.clone()
    }

    /// Append a child.
    pub fn push(&mut self, node: PageTreeNode) -> Result<()> {
        self.insert(self.items.len(), node)
    }

    /// Insert a child at `index`, shifting later children right.
    pub fn insert(&mut self, index: usize, node: PageTreeNode) -> Result<()> {
        if index > self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        self.store
            .array_insert(self.owner.dict_ref(), KIDS, index, node.dict_ref())?;
        self.items.insert(index, node);
        Ok(())
    }

    /// Remove and return the child at `index`.
    pub fn remove(&mut self, index: usize) -> Result<PageTreeNode> {
        if index >= self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        self.store.array_remove(self.owner.dict_ref(), KIDS, index)?;
        Ok(self.items.remove(index))
    }

    /// Replace the child at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, node: PageTreeNode) -> Result<PageTreeNode> {
        if index >= self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        self.store
            .array_replace(self.owner.dict_ref(), KIDS, index, node.dict_ref())?;
        Ok(std::mem::replace(&mut self.items[index], node))
    }

    /// Move the child at `from` so that it ends up at `to`.
    pub fn move_kid(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.items.len() {
            return Err(self.out_of_bounds(from));
        }
        if to >= self.items.len() {
            return Err(self.out_of_bounds(to));
        }
        let node = self.remove(from)?;
        self.insert(to, node)
    }

    /// Remove every child.
    pub fn clear(&mut self) -> Result<()> {
        self.store.array_mut(self.owner.dict_ref(), KIDS)?.clear();
        self.items.clear();
        Ok(())
    }

    fn out_of_bounds(&self, index: usize) -> Error {
        Error::IndexOutOfBounds {
            index,
            len: self.items.len(),
        }
    }
}

impl<'k, 'a> IntoIterator for &'k Kids<'a> {
    type Item = &'k PageTreeNode;
    type IntoIter = std::slice::Iter<'k, PageTreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
