//! Page tree nodes.
//!
//! A [`PageTreeNode`] is a handle onto a dictionary in an [`ObjectStore`]. It
//! carries the dictionary's reference and the kind read from its /Type entry
//! when the handle was made; everything else is read from the store on demand.

use serde::{Deserialize, Serialize};

use super::guard::TraversalGuard;
use super::kids::Kids;
use super::{COUNT, KIDS, PARENT, PARENT_ABBREVIATED, TYPE};
use crate::error::{Error, Result};
use crate::geometry::Rectangle;
use crate::object::{Dictionary, Object, ObjectRef};
use crate::resources::Resources;
use crate::store::ObjectStore;

/// Whether a node is a grouping node or a leaf page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Intermediate node (/Type /Pages) grouping other nodes and pages
    Pages,
    /// Leaf node (/Type /Page)
    Page,
}

impl NodeKind {
    /// The /Type name for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Pages => "Pages",
            NodeKind::Page => "Page",
        }
    }

    /// Classify the dictionary behind `dict` by its /Type entry.
    ///
    /// Anything that is not tagged /Page is treated as a grouping node.
    pub fn classify(store: &ObjectStore, dict: ObjectRef) -> Result<Self> {
        match store.get_field(dict, TYPE)? {
            Some(Object::Name(name)) if name == "Page" => Ok(NodeKind::Page),
            _ => Ok(NodeKind::Pages),
        }
    }
}

/// A node in the page tree, either a grouping node or a leaf page.
///
/// Handles are cheap to copy and compare equal when they point at the same
/// dictionary. The /Parent back-reference and the parent's /Kids array are
/// independent data: [`set_parent`](Self::set_parent) only writes the former,
/// editing [`kids`](Self::kids) only writes the latter. Use
/// [`append_child`](Self::append_child) or [`remove_child`](Self::remove_child)
/// to keep both sides in step.
#[derive(Debug, Clone, Copy)]
pub struct PageTreeNode {
    dict: ObjectRef,
    kind: NodeKind,
}

impl PartialEq for PageTreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.dict == other.dict
    }
}

impl Eq for PageTreeNode {}

impl std::hash::Hash for PageTreeNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.dict.hash(state);
    }
}

impl PageTreeNode {
    /// Create an empty grouping node: `<< /Type /Pages /Kids [] /Count 0 >>`.
    pub fn new_pages(store: &mut ObjectStore) -> Result<Self> {
        let mut dict = Dictionary::new();
        dict.insert(TYPE.to_string(), Object::name("Pages"));
        dict.insert(KIDS.to_string(), Object::Array(Vec::new()));
        dict.insert(COUNT.to_string(), Object::Integer(0));
        Ok(Self {
            dict: store.add(dict)?,
            kind: NodeKind::Pages,
        })
    }

    /// Create an empty leaf page: `<< /Type /Page >>`.
    pub fn new_page(store: &mut ObjectStore) -> Result<Self> {
        let mut dict = Dictionary::new();
        dict.insert(TYPE.to_string(), Object::name("Page"));
        Ok(Self {
            dict: store.add(dict)?,
            kind: NodeKind::Page,
        })
    }

    /// Wrap an existing dictionary, classifying it by its /Type entry.
    pub fn from_ref(store: &ObjectStore, dict: ObjectRef) -> Result<Self> {
        store.dict(dict)?;
        Ok(Self {
            dict,
            kind: NodeKind::classify(store, dict)?,
        })
    }

    /// Wrap a /Kids or /Parent entry. Entries must be indirect references.
    pub(crate) fn from_entry(store: &ObjectStore, entry: &Object) -> Result<Self> {
        let dict = entry
            .as_reference()
            .ok_or_else(|| Error::wrong_type("Reference", entry))?;
        Self::from_ref(store, dict)
    }

    /// Reference to the backing dictionary.
    pub fn dict_ref(&self) -> ObjectRef {
        self.dict
    }

    /// Kind read from /Type when this handle was made.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether this is a leaf page.
    pub fn is_page(&self) -> bool {
        self.kind == NodeKind::Page
    }

    /// Whether this is a grouping node.
    pub fn is_pages(&self) -> bool {
        self.kind == NodeKind::Pages
    }

    /// Borrow the backing dictionary.
    pub fn dictionary<'a>(&self, store: &'a ObjectStore) -> Result<&'a Dictionary> {
        store.dict(self.dict)
    }

    // === Navigation ===

    /// The parent node, read from /Parent (or the abbreviated /P).
    ///
    /// The parent is not checked to be a grouping node.
    pub fn parent(&self, store: &ObjectStore) -> Result<Option<Self>> {
        let entry = match store.get_raw_field(self.dict, PARENT)? {
            Some(entry) => Some(entry),
            None => store.get_raw_field(self.dict, PARENT_ABBREVIATED)?,
        };
        entry.map(|entry| Self::from_entry(store, entry)).transpose()
    }

    /// Point /Parent at `parent`.
    ///
    /// The parent's /Kids array is left untouched.
    pub fn set_parent(&self, store: &mut ObjectStore, parent: PageTreeNode) -> Result<()> {
        store.set_field(self.dict, PARENT, parent.dict)
    }

    /// Remove the /Parent back-reference, making this node a root.
    pub fn clear_parent(&self, store: &mut ObjectStore) -> Result<()> {
        store.remove_field(self.dict, PARENT)?;
        store.remove_field(self.dict, PARENT_ABBREVIATED)?;
        Ok(())
    }

    /// Append `child` to /Kids and point its /Parent here.
    ///
    /// /Count is not updated; call [`update_count`](Self::update_count) afterwards.
    pub fn append_child(&self, store: &mut ObjectStore, child: PageTreeNode) -> Result<()> {
        self.kids(store)?.push(child)?;
        child.set_parent(store, *self)
    }

    /// Remove the first occurrence of `child` from /Kids and drop its /Parent
    /// if it pointed here. Returns whether `child` was found.
    pub fn remove_child(&self, store: &mut ObjectStore, child: PageTreeNode) -> Result<bool> {
        {
            let mut kids = self.kids(store)?;
            match kids.position(child) {
                Some(index) => {
                    kids.remove(index)?;
                },
                None => return Ok(false),
            }
        }
        if child.parent(store)?.map(|p| p.dict) == Some(self.dict) {
            child.clear_parent(store)?;
        }
        Ok(true)
    }

    /// Direct children in /Kids order.
    ///
    /// A missing /Kids array yields no children.
    pub fn children(&self, store: &ObjectStore) -> Result<Vec<Self>> {
        match store.array(self.dict, KIDS)? {
            Some(kids) => kids.iter().map(|kid| Self::from_entry(store, kid)).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Editable view over /Kids.
    pub fn kids<'a>(&self, store: &'a mut ObjectStore) -> Result<Kids<'a>> {
        Kids::new(store, *self)
    }

    /// Collect descendants in document order.
    ///
    /// With `recurse` set, grouping nodes are expanded depth-first and only
    /// leaf pages are returned. Without it, the direct children are returned
    /// as-is, grouping nodes included.
    pub fn all_leaves(&self, store: &ObjectStore, recurse: bool) -> Result<Vec<Self>> {
        let mut result = Vec::new();
        let mut guard = TraversalGuard::new(store.config());
        self.collect_kids(store, recurse, &mut result, &mut guard)?;
        Ok(result)
    }

    /// Append every leaf page below this node to `result`, in document order.
    pub fn collect_leaves(&self, store: &ObjectStore, result: &mut Vec<Self>) -> Result<()> {
        let mut guard = TraversalGuard::new(store.config());
        self.collect_kids(store, true, result, &mut guard)
    }

    fn collect_kids(
        &self,
        store: &ObjectStore,
        recurse: bool,
        result: &mut Vec<Self>,
        guard: &mut TraversalGuard,
    ) -> Result<()> {
        guard.enter(self.dict)?;
        for kid in self.children(store)? {
            match kid.kind {
                NodeKind::Page => result.push(kid),
                NodeKind::Pages if recurse => kid.collect_kids(store, recurse, result, guard)?,
                NodeKind::Pages => result.push(kid),
            }
        }
        guard.leave(self.dict);
        Ok(())
    }

    // === Counting ===

    /// Recompute /Count bottom-up and return it.
    ///
    /// Every grouping node below this one gets its /Count rewritten. A leaf
    /// page has no descendants; it reports 0 and is left untouched.
    pub fn update_count(&self, store: &mut ObjectStore) -> Result<u64> {
        let mut guard = TraversalGuard::new(store.config());
        self.update_count_guarded(store, &mut guard)
    }

    fn update_count_guarded(&self, store: &mut ObjectStore, guard: &mut TraversalGuard) -> Result<u64> {
        if self.is_page() {
            return Ok(0);
        }
        guard.enter(self.dict)?;
        let mut total = 0u64;
        for kid in self.children(store)? {
            total += match kid.kind {
                NodeKind::Page => 1,
                NodeKind::Pages => kid.update_count_guarded(store, guard)?,
            };
        }
        log::debug!("Pages node {} holds {} pages", self.dict, total);
        store.set_field(self.dict, COUNT, Object::Integer(total as i64))?;
        guard.leave(self.dict);
        Ok(total)
    }

    /// The stored /Count, which may be stale after structural edits.
    ///
    /// A missing /Count reads as 0. A real /Count is truncated toward zero.
    pub fn count(&self, store: &ObjectStore) -> Result<u64> {
        let object = match store.get_field(self.dict, COUNT)? {
            None => return Ok(0),
            Some(object) => object,
        };
        let n = integer_from_object(object)?;
        u64::try_from(n)
            .map_err(|_| Error::InvalidPageTree(format!("negative /Count {} on {}", n, self.dict)))
    }

    // === Attributes declared on this node only ===

    /// /Resources declared on this node, without looking at ancestors.
    pub fn resources(&self, store: &ObjectStore) -> Result<Option<Resources>> {
        store
            .get_field(self.dict, super::RESOURCES)?
            .map(resources_from_object)
            .transpose()
    }

    /// Set or, with `None`, remove /Resources on this node.
    pub fn set_resources(&self, store: &mut ObjectStore, resources: Option<Resources>) -> Result<()> {
        set_or_remove(store, self.dict, super::RESOURCES, resources.map(Object::from))
    }

    /// /MediaBox declared on this node, without looking at ancestors.
    pub fn media_box(&self, store: &ObjectStore) -> Result<Option<Rectangle>> {
        read_rectangle(store, self.dict, super::MEDIA_BOX)
    }

    /// Set or, with `None`, remove /MediaBox on this node.
    pub fn set_media_box(&self, store: &mut ObjectStore, media_box: Option<Rectangle>) -> Result<()> {
        set_or_remove(store, self.dict, super::MEDIA_BOX, media_box.map(|r| r.to_object()))
    }

    /// /CropBox declared on this node, without looking at ancestors.
    pub fn crop_box(&self, store: &ObjectStore) -> Result<Option<Rectangle>> {
        read_rectangle(store, self.dict, super::CROP_BOX)
    }

    /// Set or, with `None`, remove /CropBox on this node.
    pub fn set_crop_box(&self, store: &mut ObjectStore, crop_box: Option<Rectangle>) -> Result<()> {
        set_or_remove(store, self.dict, super::CROP_BOX, crop_box.map(|r| r.to_object()))
    }

    /// /Rotate declared on this node, without looking at ancestors.
    pub fn rotation(&self, store: &ObjectStore) -> Result<Option<i32>> {
        store
            .get_field(self.dict, super::ROTATE)?
            .map(rotation_from_object)
            .transpose()
    }

    /// Set or, with `None`, remove /Rotate on this node.
    ///
    /// Values are stored as given; multiples of 90 are expected but not enforced.
    pub fn set_rotation(&self, store: &mut ObjectStore, rotation: Option<i32>) -> Result<()> {
        set_or_remove(
            store,
            self.dict,
            super::ROTATE,
            rotation.map(|r| Object::Integer(r as i64)),
        )
    }
}

pub(crate) fn resources_from_object(object: &Object) -> Result<Resources> {
    object
        .as_dict()
        .map(|dict| Resources::from(dict.clone()))
        .ok_or_else(|| Error::wrong_type("Dictionary", object))
}

pub(crate) fn rotation_from_object(object: &Object) -> Result<i32> {
    let n = integer_from_object(object)?;
    i32::try_from(n).map_err(|_| Error::wrong_type("32-bit integer", object))
}

/// Read an integer or real as a whole number, truncating reals toward zero.
///
/// Non-finite reals and reals outside the `i64` range are rejected.
fn integer_from_object(object: &Object) -> Result<i64> {
    match object {
        Object::Integer(n) => Ok(*n),
        Object::Real(r) if r.is_finite() && *r >= i64::MIN as f64 && *r < i64::MAX as f64 => {
            Ok(r.trunc() as i64)
        },
        _ => Err(Error::wrong_type("Number", object)),
    }
}

fn read_rectangle(store: &ObjectStore, dict: ObjectRef, key: &str) -> Result<Option<Rectangle>> {
    store
        .get_field(dict, key)?
        .map(Rectangle::from_object)
        .transpose()
}

fn set_or_remove(store: &mut ObjectStore, dict: ObjectRef, key: &str, value: Option<Object>) -> Result<()> {
    match value {
        Some(value) => store.set_field(dict, key, value),
        None => store.remove_field(dict, key).map(|_| ()),
    }
}
