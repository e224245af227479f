//! The page tree.
//!
//! Pages are organized as a tree of dictionaries: grouping nodes
//! (/Type /Pages) hold an ordered /Kids array of references to further nodes
//! or leaf pages (/Type /Page), and every node points back at its parent
//! through /Parent. Grouping nodes also cache the number of leaf pages below
//! them in /Count.
//!
//! ## Design
//!
//! - Nodes are [`PageTreeNode`] handles over dictionaries in an
//!   [`ObjectStore`](crate::store::ObjectStore). The store is the source of
//!   truth; handles are made on demand and thrown away.
//! - /Count is never updated implicitly. After structural edits call
//!   [`PageTreeNode::update_count`].
//! - Inheritable attributes (/Resources, /MediaBox, /CropBox, /Rotate) are
//!   resolved on every read by walking /Parent links, so edits to an
//!   ancestor are visible immediately. See [`inherit`].
//! - Every walk is bounded by [`PageTreeConfig::max_depth`](crate::config::PageTreeConfig)
//!   and fails with [`Error::CircularReference`](crate::Error::CircularReference)
//!   if it meets a node already on its path.
//!
//! ## Example
//!
//! ```
//! use pdf_page_tree::geometry::Rectangle;
//! use pdf_page_tree::page_tree::PageTreeNode;
//! use pdf_page_tree::store::ObjectStore;
//!
//! # fn main() -> pdf_page_tree::Result<()> {
//! let mut store = ObjectStore::new();
//! let root = PageTreeNode::new_pages(&mut store)?;
//! root.set_media_box(&mut store, Some(Rectangle::from_dimensions(612.0, 792.0)))?;
//!
//! let page = PageTreeNode::new_page(&mut store)?;
//! root.append_child(&mut store, page)?;
//! assert_eq!(root.update_count(&mut store)?, 1);
//!
//! // The page declares no boxes of its own.
//! assert_eq!(page.find_crop_box(&store)?, Some(Rectangle::from_dimensions(612.0, 792.0)));
//! assert_eq!(page.find_rotation(&store)?, 0);
//! # Ok(())
//! # }
//! ```

mod guard;
pub mod inherit;
mod kids;
mod node;

pub use inherit::{find_inherited, InheritableAttribute, Inherited};
pub use kids::Kids;
pub use node::{NodeKind, PageTreeNode};

pub(crate) const TYPE: &str = "Type";
pub(crate) const KIDS: &str = "Kids";
pub(crate) const COUNT: &str = "Count";
pub(crate) const PARENT: &str = "Parent";
pub(crate) const PARENT_ABBREVIATED: &str = "P";
pub(crate) const RESOURCES: &str = "Resources";
pub(crate) const MEDIA_BOX: &str = "MediaBox";
pub(crate) const CROP_BOX: &str = "CropBox";
pub(crate) const ROTATE: &str = "Rotate";
