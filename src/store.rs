//! In-memory object store.
//!
//! The store is an arena of indirect objects addressed by [`ObjectRef`]. It is
//! the only boundary between the page tree and the underlying object model:
//! field reads and writes on dictionaries, array access and mutation, and
//! transparent dereferencing of indirect references.
//!
//! A `Null` field value is treated the same as an absent field.

use std::collections::BTreeMap;

use crate::config::PageTreeConfig;
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object, ObjectRef};

/// Where an array field lives once references are followed.
enum ArraySlot {
    Inline,
    Indirect(ObjectRef),
    Missing,
}

/// Arena of indirect objects.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: BTreeMap<ObjectRef, Object>,
    /// Next object number to hand out; `None` once `u32::MAX` has been used.
    next_id: Option<u32>,
    config: PageTreeConfig,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(PageTreeConfig::default())
    }

    /// Create an empty store with an explicit configuration.
    pub fn with_config(config: PageTreeConfig) -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: Some(1),
            config,
        }
    }

    /// Traversal configuration used by page tree walks over this store.
    pub fn config(&self) -> &PageTreeConfig {
        &self.config
    }

    /// Number of indirect objects held.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether an object exists under the given reference.
    pub fn contains(&self, obj_ref: ObjectRef) -> bool {
        self.objects.contains_key(&obj_ref)
    }

    /// Add an object under a freshly allocated reference.
    ///
    /// Fails with [`Error::ObjectIdsExhausted`] once an object numbered
    /// `u32::MAX` has been allocated or inserted.
    pub fn add(&mut self, object: impl Into<Object>) -> Result<ObjectRef> {
        let id = self.next_id.ok_or(Error::ObjectIdsExhausted)?;
        self.next_id = id.checked_add(1);
        let obj_ref = ObjectRef::new(id, 0);
        self.objects.insert(obj_ref, object.into());
        Ok(obj_ref)
    }

    /// Place an object under an explicit reference, returning the previous value.
    ///
    /// Later allocations continue above the highest object number seen.
    pub fn insert(&mut self, obj_ref: ObjectRef, object: impl Into<Object>) -> Option<Object> {
        if let Some(next) = self.next_id {
            if obj_ref.id >= next {
                self.next_id = obj_ref.id.checked_add(1);
            }
        }
        self.objects.insert(obj_ref, object.into())
    }

    /// Get the object stored under a reference without following further references.
    pub fn get(&self, obj_ref: ObjectRef) -> Option<&Object> {
        self.objects.get(&obj_ref)
    }

    /// Follow a chain of references starting at `obj_ref` until a direct object is found,
    /// returning the reference that holds it.
    fn target_ref(&self, obj_ref: ObjectRef) -> Result<ObjectRef> {
        let mut current = obj_ref;
        let mut seen = Vec::new();
        loop {
            if seen.contains(&current) {
                log::warn!("Reference loop while resolving object {}", obj_ref);
                return Err(Error::CircularReference(current));
            }
            if seen.len() as u32 >= self.config.max_depth {
                return Err(Error::RecursionLimitExceeded(self.config.max_depth));
            }
            seen.push(current);

            match self.objects.get(&current) {
                Some(Object::Reference(next)) => current = *next,
                Some(_) => return Ok(current),
                None => return Err(Error::ObjectNotFound(current.id, current.gen)),
            }
        }
    }

    /// Dereference an indirect object to its direct value.
    pub fn resolve_ref(&self, obj_ref: ObjectRef) -> Result<&Object> {
        let target = self.target_ref(obj_ref)?;
        self.objects
            .get(&target)
            .ok_or(Error::ObjectNotFound(target.id, target.gen))
    }

    /// Resolve a value: references are dereferenced, direct objects are returned as-is.
    pub fn resolve<'a>(&'a self, object: &'a Object) -> Result<&'a Object> {
        match object {
            Object::Reference(obj_ref) => self.resolve_ref(*obj_ref),
            other => Ok(other),
        }
    }

    /// Get the dictionary behind a reference.
    pub fn dict(&self, obj_ref: ObjectRef) -> Result<&Dictionary> {
        let object = self.resolve_ref(obj_ref)?;
        object
            .as_dict()
            .ok_or_else(|| Error::wrong_type("Dictionary", object))
    }

    /// Get the dictionary behind a reference for mutation.
    pub fn dict_mut(&mut self, obj_ref: ObjectRef) -> Result<&mut Dictionary> {
        let target = self.target_ref(obj_ref)?;
        let object = self
            .objects
            .get_mut(&target)
            .ok_or(Error::ObjectNotFound(target.id, target.gen))?;
        match object {
            Object::Dictionary(dict) => Ok(dict),
            other => Err(Error::wrong_type("Dictionary", other)),
        }
    }

    /// Read a field from a dictionary, dereferencing it.
    ///
    /// Returns `Ok(None)` when the key is missing or holds `Null`.
    pub fn get_field(&self, dict: ObjectRef, key: &str) -> Result<Option<&Object>> {
        let raw = match self.dict(dict)?.get(key) {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let value = self.resolve(raw)?;
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    /// Read a field from a dictionary without dereferencing it.
    pub fn get_raw_field(&self, dict: ObjectRef, key: &str) -> Result<Option<&Object>> {
        Ok(self.dict(dict)?.get(key).filter(|value| !value.is_null()))
    }

    /// Write a field on a dictionary.
    pub fn set_field(&mut self, dict: ObjectRef, key: &str, value: impl Into<Object>) -> Result<()> {
        self.dict_mut(dict)?.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Remove a field from a dictionary, returning its raw value.
    pub fn remove_field(&mut self, dict: ObjectRef, key: &str) -> Result<Option<Object>> {
        Ok(self.dict_mut(dict)?.shift_remove(key))
    }

    /// Read an array field, dereferencing it. Missing arrays yield `Ok(None)`.
    pub fn array(&self, dict: ObjectRef, key: &str) -> Result<Option<&Vec<Object>>> {
        match self.get_field(dict, key)? {
            None => Ok(None),
            Some(Object::Array(items)) => Ok(Some(items)),
            Some(other) => Err(Error::wrong_type("Array", other)),
        }
    }

    fn array_slot(&self, dict: ObjectRef, key: &str) -> Result<ArraySlot> {
        match self.get_raw_field(dict, key)? {
            None => Ok(ArraySlot::Missing),
            Some(Object::Array(_)) => Ok(ArraySlot::Inline),
            Some(Object::Reference(obj_ref)) => {
                let target = self.target_ref(*obj_ref)?;
                match self.objects.get(&target) {
                    Some(Object::Array(_)) => Ok(ArraySlot::Indirect(target)),
                    Some(Object::Null) => Ok(ArraySlot::Missing),
                    Some(other) => Err(Error::wrong_type("Array", other)),
                    None => Err(Error::ObjectNotFound(target.id, target.gen)),
                }
            },
            Some(other) => Err(Error::wrong_type("Array", other)),
        }
    }

    /// Get an array field for mutation, creating an empty inline array if it is missing.
    pub fn array_mut(&mut self, dict: ObjectRef, key: &str) -> Result<&mut Vec<Object>> {
        let slot = self.array_slot(dict, key)?;
        let object = match slot {
            ArraySlot::Indirect(target) => self
                .objects
                .get_mut(&target)
                .ok_or(Error::ObjectNotFound(target.id, target.gen))?,
            ArraySlot::Inline => self
                .dict_mut(dict)?
                .get_mut(key)
                .ok_or_else(|| Error::InvalidPageTree(format!("/{} vanished", key)))?,
            ArraySlot::Missing => {
                let fields = self.dict_mut(dict)?;
                fields.insert(key.to_string(), Object::Array(Vec::new()));
                fields
                    .get_mut(key)
                    .ok_or_else(|| Error::InvalidPageTree(format!("/{} vanished", key)))?
            },
        };
        match object {
            Object::Array(items) => Ok(items),
            other => Err(Error::wrong_type("Array", other)),
        }
    }

    /// Length of an array field. Missing arrays have length zero.
    pub fn array_len(&self, dict: ObjectRef, key: &str) -> Result<usize> {
        Ok(self.array(dict, key)?.map_or(0, |items| items.len()))
    }

    /// Get an array element without dereferencing it.
    pub fn array_get(&self, dict: ObjectRef, key: &str, index: usize) -> Result<&Object> {
        let items = self.array(dict, key)?.map(|items| items.as_slice()).unwrap_or(&[]);
        items.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    /// Insert an element into an array field, shifting later elements right.
    pub fn array_insert(
        &mut self,
        dict: ObjectRef,
        key: &str,
        index: usize,
        value: impl Into<Object>,
    ) -> Result<()> {
        let items = self.array_mut(dict, key)?;
        if index > items.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        items.insert(index, value.into());
        Ok(())
    }

    /// Remove an element from an array field, returning it.
    pub fn array_remove(&mut self, dict: ObjectRef, key: &str, index: usize) -> Result<Object> {
        let items = self.array_mut(dict, key)?;
        if index >= items.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    /// Replace an element of an array field, returning the previous value.
    pub fn array_replace(
        &mut self,
        dict: ObjectRef,
        key: &str,
        index: usize,
        value: impl Into<Object>,
    ) -> Result<Object> {
        let items = self.array_mut(dict, key)?;
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        Ok(std::mem::replace(slot, value.into()))
    }
}
