//! Untracked per-trajectory storage for callback helpers.
//!
//! Values here persist across the steps of one trajectory but are never
//! recorded into history and never reach the statistics layer. Typical
//! contents are random variables, state machines, or lookup tables
//! built in the begin callback.

use std::any::{type_name, Any};

use indexmap::IndexMap;
use mcsl_core::AccessError;

/// Name-keyed store of arbitrary `Send` values owned by one trajectory.
#[derive(Default)]
pub struct AuxStore {
    entries: IndexMap<String, Box<dyn Any + Send>>,
}

impl AuxStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value stored under `name`.
    ///
    /// The replacement may have a different type than the previous value.
    pub fn insert<T: Any + Send>(&mut self, name: impl Into<String>, value: T) {
        self.entries.insert(name.into(), Box::new(value));
    }

    /// Borrow the value under `name` as a `T`.
    pub fn get<T: Any>(&self, name: &str) -> Result<&T, AccessError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| AccessError::UnknownAuxiliary { name: name.into() })?;
        entry
            .downcast_ref::<T>()
            .ok_or_else(|| AccessError::AuxiliaryTypeMismatch {
                name: name.into(),
                requested: type_name::<T>(),
            })
    }

    /// Mutably borrow the value under `name` as a `T`.
    pub fn get_mut<T: Any>(&mut self, name: &str) -> Result<&mut T, AccessError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AccessError::UnknownAuxiliary { name: name.into() })?;
        entry
            .downcast_mut::<T>()
            .ok_or_else(|| AccessError::AuxiliaryTypeMismatch {
                name: name.into(),
                requested: type_name::<T>(),
            })
    }

    /// Remove and return the value under `name`, if it is a `T`.
    ///
    /// A value of another type is left in place.
    pub fn remove<T: Any>(&mut self, name: &str) -> Result<T, AccessError> {
        self.get::<T>(name)?;
        match self.entries.shift_remove(name).map(|b| b.downcast::<T>()) {
            Some(Ok(value)) => Ok(*value),
            _ => Err(AccessError::UnknownAuxiliary { name: name.into() }),
        }
    }

    /// Whether a value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Stored names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for AuxStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
