//! Collider handle -> semantic entity lookup
//!
//! Built once while the course is generated, read-only during
//! simulation. The registry owns no bodies; the physics engine is the
//! sole owner of body lifetime, and entries are just integer-keyed
//! references into the layout's descriptor lists.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::physics::ColliderHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Platform,
    Spinner,
    Pendulum,
    Finish,
    Player,
}

impl EntityKind {
    /// Hazard surfaces never count as landing surfaces.
    pub fn is_hazard(self) -> bool {
        matches!(self, EntityKind::Spinner | EntityKind::Pendulum)
    }
}

/// (kind, index) reference into the course layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub index: usize,
}

impl EntityRef {
    pub fn platform(index: usize) -> Self {
        Self {
            kind: EntityKind::Platform,
            index,
        }
    }

    pub fn spinner(index: usize) -> Self {
        Self {
            kind: EntityKind::Spinner,
            index,
        }
    }

    pub fn pendulum(index: usize) -> Self {
        Self {
            kind: EntityKind::Pendulum,
            index,
        }
    }

    pub fn finish() -> Self {
        Self {
            kind: EntityKind::Finish,
            index: 0,
        }
    }

    pub fn player() -> Self {
        Self {
            kind: EntityKind::Player,
            index: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct HandleRegistry {
    entries: HashMap<ColliderHandle, EntityRef>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider. Handles are unique for the lifetime of a
    /// course; a re-registration is a generation bug, so the first entry
    /// wins and the duplicate is reported.
    pub fn insert(&mut self, handle: ColliderHandle, entity: EntityRef) {
        match self.entries.entry(handle) {
            Entry::Occupied(slot) => {
                log::warn!(
                    "collider {handle:?} already registered as {:?}, ignoring {entity:?}",
                    slot.get()
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(entity);
            }
        }
    }

    /// `None` means untracked geometry: treated as ordinary surface
    /// contact by the router, never an error.
    pub fn lookup(&self, handle: ColliderHandle) -> Option<EntityRef> {
        self.entries.get(&handle).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
