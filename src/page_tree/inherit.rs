//! Inheritable page attributes.
//!
//! /Resources, /MediaBox, /CropBox and /Rotate may be declared on any node
//! and apply to every page below it that does not declare its own. Lookups
//! read the node's own dictionary first and then walk /Parent links toward the
//! root, stopping at the first declaration. The nearest declaration wins as a
//! whole; values are never merged across levels.
//!
//! Nothing is cached. Each lookup walks the live store, so an edit to an
//! ancestor is seen by the next lookup on any descendant.
//!
//! Defaults when no node on the chain declares the attribute:
//!
//! | Attribute | Default |
//! |---|---|
//! | /Resources | none |
//! | /MediaBox | none |
//! | /CropBox | the inherited /MediaBox |
//! | /Rotate | 0 |

use super::guard::TraversalGuard;
use super::node::{resources_from_object, rotation_from_object, PageTreeNode};
use super::{CROP_BOX, MEDIA_BOX, RESOURCES, ROTATE};
use crate::error::Result;
use crate::geometry::Rectangle;
use crate::object::{Dictionary, Object};
use crate::resources::Resources;
use crate::store::ObjectStore;

/// The attributes a page can inherit from its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InheritableAttribute {
    /// /Resources
    Resources,
    /// /MediaBox
    MediaBox,
    /// /CropBox
    CropBox,
    /// /Rotate
    Rotate,
}

impl InheritableAttribute {
    /// Every inheritable attribute.
    pub const ALL: [InheritableAttribute; 4] = [
        InheritableAttribute::Resources,
        InheritableAttribute::MediaBox,
        InheritableAttribute::CropBox,
        InheritableAttribute::Rotate,
    ];

    /// Dictionary key holding this attribute.
    pub fn key(&self) -> &'static str {
        match self {
            InheritableAttribute::Resources => RESOURCES,
            InheritableAttribute::MediaBox => MEDIA_BOX,
            InheritableAttribute::CropBox => CROP_BOX,
            InheritableAttribute::Rotate => ROTATE,
        }
    }
}

/// An attribute value found on a node or one of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inherited<'a> {
    /// The resolved value
    pub value: &'a Object,
    /// The node that declares it
    pub source: PageTreeNode,
}

/// Find the nearest declaration of `attribute`, starting at `node` itself.
///
/// Returns `Ok(None)` when neither the node nor any ancestor declares it.
/// No attribute-specific default is applied here.
pub fn find_inherited<'a>(
    store: &'a ObjectStore,
    node: PageTreeNode,
    attribute: InheritableAttribute,
) -> Result<Option<Inherited<'a>>> {
    let key = attribute.key();
    let mut guard = TraversalGuard::new(store.config());
    let mut current = node;
    loop {
        guard.enter(current.dict_ref())?;
        if let Some(value) = store.get_field(current.dict_ref(), key)? {
            if current != node {
                log::debug!(
                    "Node {} inherits /{} from ancestor {}",
                    node.dict_ref(),
                    key,
                    current.dict_ref()
                );
            }
            return Ok(Some(Inherited {
                value,
                source: current,
            }));
        }
        match current.parent(store)? {
            Some(parent) => current = parent,
            None => return Ok(None),
        }
    }
}

impl PageTreeNode {
    /// Resources for this node, looked up through its ancestors.
    pub fn find_resources(&self, store: &ObjectStore) -> Result<Option<Resources>> {
        find_inherited(store, *self, InheritableAttribute::Resources)?
            .map(|found| resources_from_object(found.value))
            .transpose()
    }

    /// Media box for this node, looked up through its ancestors.
    pub fn find_media_box(&self, store: &ObjectStore) -> Result<Option<Rectangle>> {
        find_inherited(store, *self, InheritableAttribute::MediaBox)?
            .map(|found| Rectangle::from_object(found.value))
            .transpose()
    }

    /// Crop box for this node, looked up through its ancestors.
    ///
    /// The crop box chain is searched on its own first; the media box is only
    /// consulted once no node up to the root declares a crop box. A media box
    /// on an intermediate node therefore never hides a crop box declared
    /// higher up.
    pub fn find_crop_box(&self, store: &ObjectStore) -> Result<Option<Rectangle>> {
        match find_inherited(store, *self, InheritableAttribute::CropBox)? {
            Some(found) => Rectangle::from_object(found.value).map(Some),
            None => self.find_media_box(store),
        }
    }

    /// Rotation for this node, looked up through its ancestors. Defaults to 0.
    pub fn find_rotation(&self, store: &ObjectStore) -> Result<i32> {
        match find_inherited(store, *self, InheritableAttribute::Rotate)? {
            Some(found) => rotation_from_object(found.value),
            None => Ok(0),
        }
    }

    /// A copy of this node's dictionary with every inheritable attribute it
    /// lacks filled in from its nearest declaring ancestor.
    ///
    /// Only declared values are copied; defaults are not synthesized. The
    /// result is detached from the store.
    pub fn inherited_dictionary(&self, store: &ObjectStore) -> Result<Dictionary> {
        let mut dict = self.dictionary(store)?.clone();
        for attribute in InheritableAttribute::ALL {
            let key = attribute.key();
            if dict.get(key).is_some_and(|value| !value.is_null()) {
                continue;
            }
            if let Some(found) = find_inherited(store, *self, attribute)? {
                dict.insert(key.to_string(), found.value.clone());
            }
        }
        Ok(dict)
    }
}
