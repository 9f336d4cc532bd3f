//! Inline caches for call sites and property access sites.
//!
//! Each syntactic site owns one cache per session, keyed on the AST
//! node's address so no two sites (and no two sessions) ever share an
//! entry. A cache starts uninitialized, goes monomorphic on first use,
//! widens to polymorphic up to [`IC_CAPACITY`] entries, and then
//! degrades to megamorphic where it stops recording and every access
//! takes the slow path.

use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::shape::{Shape, ShapeId};
use crate::runtime::registry::{Executable, Function};

pub const IC_CAPACITY: usize = 4;

#[derive(Clone)]
pub struct CallEntry {
    target: Rc<Function>,
    version: u64,
    executable: Executable,
}

/// Per-call-site cache keyed on function identity plus version.
///
/// Redefinition does not widen the cache: an entry whose target was
/// redefined is refreshed in place on the next record, because the
/// handle is the same function, just with a new body.
pub enum CallSiteCache {
    Uninitialized,
    Monomorphic(CallEntry),
    Polymorphic(SmallVec<[CallEntry; IC_CAPACITY]>),
    Megamorphic,
}

impl CallSiteCache {
    pub fn new() -> Self {
        CallSiteCache::Uninitialized
    }

    pub fn is_megamorphic(&self) -> bool {
        matches!(self, CallSiteCache::Megamorphic)
    }

    pub fn entry_count(&self) -> usize {
        match self {
            CallSiteCache::Uninitialized | CallSiteCache::Megamorphic => 0,
            CallSiteCache::Monomorphic(_) => 1,
            CallSiteCache::Polymorphic(entries) => entries.len(),
        }
    }

    /// Cached executable for `target`, if the entry is still current.
    pub fn lookup(&self, target: &Rc<Function>) -> Option<Executable> {
        let hit = |entry: &CallEntry| {
            Rc::ptr_eq(&entry.target, target) && entry.version == target.version()
        };
        match self {
            CallSiteCache::Monomorphic(entry) if hit(entry) => Some(entry.executable.clone()),
            CallSiteCache::Polymorphic(entries) => entries
                .iter()
                .find(|e| hit(e))
                .map(|e| e.executable.clone()),
            _ => None,
        }
    }

    /// Record the resolved executable for `target` after a slow-path
    /// resolution. A stale entry for the same handle is refreshed in
    /// place; a genuinely new target widens the cache.
    pub fn record(&mut self, target: &Rc<Function>, executable: Executable) {
        let entry = CallEntry {
            target: target.clone(),
            version: target.version(),
            executable,
        };
        match self {
            CallSiteCache::Uninitialized => *self = CallSiteCache::Monomorphic(entry),
            CallSiteCache::Monomorphic(existing) => {
                if Rc::ptr_eq(&existing.target, target) {
                    *existing = entry;
                } else {
                    let mut entries = SmallVec::new();
                    entries.push(existing.clone());
                    entries.push(entry);
                    *self = CallSiteCache::Polymorphic(entries);
                }
            }
            CallSiteCache::Polymorphic(entries) => {
                if let Some(existing) = entries
                    .iter_mut()
                    .find(|e| Rc::ptr_eq(&e.target, target))
                {
                    *existing = entry;
                } else if entries.len() < IC_CAPACITY {
                    entries.push(entry);
                } else {
                    *self = CallSiteCache::Megamorphic;
                }
            }
            CallSiteCache::Megamorphic => {}
        }
    }
}

impl Default for CallSiteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct PropertyEntry {
    shape: ShapeId,
    slot: u32,
    /// For store sites that add the property: the child shape to adopt.
    transition: Option<Arc<Shape>>,
}

/// Per-property-site cache keyed on shape id. Objects in the generic
/// representation have no shape and always take the slow path.
pub enum PropertySiteCache {
    Uninitialized,
    Monomorphic(PropertyEntry),
    Polymorphic(SmallVec<[PropertyEntry; IC_CAPACITY]>),
    Megamorphic,
}

impl PropertySiteCache {
    pub fn new() -> Self {
        PropertySiteCache::Uninitialized
    }

    pub fn is_megamorphic(&self) -> bool {
        matches!(self, PropertySiteCache::Megamorphic)
    }

    pub fn entry_count(&self) -> usize {
        match self {
            PropertySiteCache::Uninitialized | PropertySiteCache::Megamorphic => 0,
            PropertySiteCache::Monomorphic(_) => 1,
            PropertySiteCache::Polymorphic(entries) => entries.len(),
        }
    }

    /// Slot and optional transition cached for `shape`.
    pub fn lookup(&self, shape: ShapeId) -> Option<(u32, Option<&Arc<Shape>>)> {
        let found = match self {
            PropertySiteCache::Monomorphic(entry) if entry.shape == shape => Some(entry),
            PropertySiteCache::Polymorphic(entries) => entries.iter().find(|e| e.shape == shape),
            _ => None,
        };
        found.map(|e| (e.slot, e.transition.as_ref()))
    }

    pub fn record(&mut self, shape: ShapeId, slot: u32, transition: Option<Arc<Shape>>) {
        let entry = PropertyEntry {
            shape,
            slot,
            transition,
        };
        match self {
            PropertySiteCache::Uninitialized => *self = PropertySiteCache::Monomorphic(entry),
            PropertySiteCache::Monomorphic(existing) => {
                if existing.shape == shape {
                    *existing = entry;
                } else {
                    let mut entries = SmallVec::new();
                    entries.push(existing.clone());
                    entries.push(entry);
                    *self = PropertySiteCache::Polymorphic(entries);
                }
            }
            PropertySiteCache::Polymorphic(entries) => {
                if let Some(existing) = entries.iter_mut().find(|e| e.shape == shape) {
                    *existing = entry;
                } else if entries.len() < IC_CAPACITY {
                    entries.push(entry);
                } else {
                    *self = PropertySiteCache::Megamorphic;
                }
            }
            PropertySiteCache::Megamorphic => {}
        }
    }
}

impl Default for PropertySiteCache {
    fn default() -> Self {
        Self::new()
    }
}
