//! Resource dictionaries.
//!
//! A /Resources entry is an arbitrary bag of named resource categories
//! (/Font, /XObject, /ExtGState, ...). The page tree does not interpret the
//! contents, it only finds the nearest declaration and hands it back.

use crate::object::{Dictionary, Object};

/// A resource dictionary as found on a page tree node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    dict: Dictionary,
}

impl Resources {
    /// Create an empty resource dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a resource category (e.g. "Font").
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.dict.get(key)
    }

    /// Whether a resource category is declared.
    pub fn contains(&self, key: &str) -> bool {
        self.dict.contains_key(key)
    }

    /// Declare or replace a resource category.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Object>) -> Option<Object> {
        self.dict.insert(key.into(), value.into())
    }

    /// Declared category names, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.dict.keys().map(|k| k.as_str())
    }

    /// Number of declared categories.
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    /// Whether no categories are declared.
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Borrow the underlying dictionary.
    pub fn as_dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Unwrap into the underlying dictionary.
    pub fn into_dictionary(self) -> Dictionary {
        self.dict
    }
}

impl From<Dictionary> for Resources {
    fn from(dict: Dictionary) -> Self {
        Self { dict }
    }
}

impl From<Resources> for Object {
    fn from(resources: Resources) -> Self {
        Object::Dictionary(resources.dict)
    }
}
