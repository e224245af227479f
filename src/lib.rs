// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::enum_variant_names)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Page Tree
//!
//! The logical page tree of a PDF document, modelled over an untyped object
//! graph.
//!
//! ## Core Features
//!
//! - **Dictionary-backed nodes**: [`PageTreeNode`] handles are thin views over
//!   dictionaries in an [`ObjectStore`]; the store stays the source of truth.
//! - **Navigation**: parent lookup, ordered children, depth-first leaf
//!   flattening, and an editable [`Kids`](page_tree::Kids) view that writes
//!   straight back into /Kids.
//! - **Page counting**: explicit bottom-up recomputation of /Count.
//! - **Attribute inheritance**: /Resources, /MediaBox, /CropBox and /Rotate
//!   resolved lazily by walking toward the root, with the /CropBox to
//!   /MediaBox fallback and the /Rotate default of 0.
//! - **Cycle safety**: every walk is depth-bounded and reports cycles as
//!   [`Error::CircularReference`] instead of overflowing the stack.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_page_tree::{ObjectStore, PageTreeNode};
//!
//! # fn main() -> pdf_page_tree::Result<()> {
//! let mut store = ObjectStore::new();
//! let root = PageTreeNode::new_pages(&mut store)?;
//! root.set_rotation(&mut store, Some(90))?;
//!
//! for _ in 0..3 {
//!     let page = PageTreeNode::new_page(&mut store)?;
//!     root.append_child(&mut store, page)?;
//! }
//! assert_eq!(root.update_count(&mut store)?, 3);
//!
//! let pages = root.all_leaves(&store, true)?;
//! assert_eq!(pages[2].find_rotation(&store)?, 90);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Object model
pub mod object;
pub mod store;

// Configuration
pub mod config;

// Page attributes
pub mod geometry;
pub mod resources;

// Page tree
pub mod page_tree;

// Re-exports
pub use config::PageTreeConfig;
pub use error::{Error, Result};
pub use geometry::Rectangle;
pub use object::{Dictionary, Object, ObjectRef};
pub use page_tree::{InheritableAttribute, Kids, NodeKind, PageTreeNode};
pub use resources::Resources;
pub use store::ObjectStore;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
