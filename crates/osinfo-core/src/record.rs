//! # Shared Records
//!
//! Every catalog entity lives behind a [`Shared`] handle: a reference-counted
//! cell around a kind-specific record. Collections, device links and the
//! catalog all hold handles to the same record, so a property written through
//! one handle is visible through every other.
//!
//! The core is single-threaded. Holding an [`Shared::entity`] borrow while
//! mutating the same entity through another handle panics in `RefCell`; the
//! catalog APIs never keep a borrow across calls.

use crate::entity::Entity;
use crate::EntityKind;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

// =============================================================================
// RECORD TRAIT
// =============================================================================

/// A kind-specific record wrapping an [`Entity`].
pub trait Record {
    /// The kind tag every record of this type carries.
    const KIND: EntityKind;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;
}

// =============================================================================
// SHARED HANDLE
// =============================================================================

/// Reference-counted handle to a record.
///
/// Cloning the handle never clones the record. Two handles compare equal
/// when their ids are equal; use [`Shared::same_entity`] for identity.
pub struct Shared<R>(Rc<RefCell<R>>);

impl<R: Record> Shared<R> {
    pub(crate) fn from_record(record: R) -> Self {
        Self(Rc::new(RefCell::new(record)))
    }

    pub(crate) fn record(&self) -> Ref<'_, R> {
        self.0.borrow()
    }

    pub(crate) fn record_mut(&self) -> RefMut<'_, R> {
        self.0.borrow_mut()
    }

    /// Kind tag of the underlying record.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        R::KIND
    }

    /// Owned copy of the entity id.
    #[must_use]
    pub fn id(&self) -> String {
        self.entity().id().to_string()
    }

    /// Borrow the underlying entity.
    #[must_use]
    pub fn entity(&self) -> Ref<'_, Entity> {
        Ref::map(self.0.borrow(), |r| r.entity())
    }

    /// Mutably borrow the underlying entity. Crate-private so the id stays
    /// fixed; callers go through the `*_param` setters.
    ///
    /// ```compile_fail
    /// use osinfo_core::{Entity, Os};
    ///
    /// let os = Os::new("fedora-11").unwrap();
    /// *os.entity_mut() = Entity::new("windows-7").unwrap();
    /// ```
    #[must_use]
    pub(crate) fn entity_mut(&self) -> RefMut<'_, Entity> {
        RefMut::map(self.0.borrow_mut(), |r| r.entity_mut())
    }

    /// True when both handles point at the same record.
    #[must_use]
    pub fn same_entity(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn param_keys(&self) -> Vec<String> {
        self.entity()
            .param_keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn param_value(&self, key: &str) -> Option<String> {
        self.entity().param_value(key).map(str::to_string)
    }

    #[must_use]
    pub fn param_value_list(&self, key: &str) -> Vec<String> {
        self.entity().param_value_list(key).to_vec()
    }

    pub fn set_param(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entity_mut().set_param(key, value);
    }

    pub fn add_param(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entity_mut().add_param(key, value);
    }

    pub fn clear_param(&self, key: &str) {
        self.entity_mut().clear_param(key);
    }
}

impl<R> Clone for Shared<R> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<R: Record> PartialEq for Shared<R> {
    fn eq(&self, other: &Self) -> bool {
        self.same_entity(other) || self.entity().id() == other.entity().id()
    }
}

impl<R: Record> Eq for Shared<R> {}

impl<R: Record> fmt::Debug for Shared<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self.0.try_borrow() {
            Ok(record) => record.entity().id().to_string(),
            Err(_) => "<borrowed>".to_string(),
        };
        f.debug_struct("Shared")
            .field("kind", &R::KIND)
            .field("id", &id)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
