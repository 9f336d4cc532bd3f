//! Hidden-class shapes for script objects.
//!
//! Every object that has only ever gained properties carries an
//! `Arc<Shape>` describing its layout. Shapes form a transition graph
//! rooted at the empty shape: adding property `p` to an object with
//! shape `S` moves it to the unique child `S.p`. Two objects built by
//! adding the same properties in the same order therefore share one
//! shape, which is what makes inline caches on property access pay off.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use crate::core::value::{FastHashMap, fast_map_new};

/// Globally unique shape identifier. Ids are never reused, so a cached
/// `ShapeId` can be compared without holding the shape alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ShapeId(pub u32);

pub struct Shape {
    id: ShapeId,
    /// Parent in the transition graph. `None` only for the empty shape.
    parent: Option<Arc<Shape>>,
    /// Property this shape adds over its parent, with its slot index.
    added: Option<(Arc<str>, u32)>,
    /// Number of slots an object with this shape stores.
    slot_count: u32,
    transitions: RwLock<FastHashMap<Arc<str>, Arc<Shape>>>,
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Slot index of `name`, walking the parent chain.
    pub fn slot_of(&self, name: &str) -> Option<u32> {
        let mut cur = self;
        loop {
            if let Some((added, slot)) = &cur.added {
                if added.as_ref() == name {
                    return Some(*slot);
                }
            }
            match &cur.parent {
                Some(p) => cur = p,
                None => return None,
            }
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.slot_of(name).is_some()
    }

    /// Property names in slot order.
    pub fn property_names(&self) -> Vec<Arc<str>> {
        let mut names = Vec::with_capacity(self.slot_count as usize);
        let mut cur = self;
        loop {
            if let Some((added, _)) = &cur.added {
                names.push(added.clone());
            }
            match &cur.parent {
                Some(p) => cur = p,
                None => break,
            }
        }
        names.reverse();
        names
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shape")
            .field("id", &self.id.0)
            .field("slot_count", &self.slot_count)
            .field("added", &self.added.as_ref().map(|(n, s)| (n.as_ref(), *s)))
            .finish()
    }
}

/// Engine-wide shape store. Owns the empty root shape and hands out
/// canonical transitions; safe to share across threads.
pub struct ShapeTable {
    next_id: AtomicU32,
    empty: Arc<Shape>,
    /// Set once a second session has been observed on the owning engine.
    /// Under contention the transition path goes straight to the write
    /// lock instead of trying the read lock first.
    contended: AtomicBool,
}

impl ShapeTable {
    pub fn new() -> Self {
        let empty = Arc::new(Shape {
            id: ShapeId(0),
            parent: None,
            added: None,
            slot_count: 0,
            transitions: RwLock::new(fast_map_new()),
        });
        ShapeTable {
            next_id: AtomicU32::new(1),
            empty,
            contended: AtomicBool::new(false),
        }
    }

    pub fn empty(&self) -> Arc<Shape> {
        self.empty.clone()
    }

    pub fn mark_contended(&self) {
        self.contended.store(true, Ordering::Relaxed);
    }

    /// Canonical transition from `from` for property `name`. Concurrent
    /// callers racing on the same edge converge on one child shape: the
    /// winner's insert is re-checked under the write lock by everyone
    /// else.
    pub fn transition(&self, from: &Arc<Shape>, name: &str) -> Arc<Shape> {
        // Under contention the read attempt is skipped: a miss needs the
        // write lock anyway, and a hit is still caught below.
        if !self.contended.load(Ordering::Relaxed) {
            let transitions = from.transitions.read().expect("shape lock poisoned");
            if let Some(child) = transitions.get(name) {
                return child.clone();
            }
        }

        let mut transitions = from.transitions.write().expect("shape lock poisoned");
        if let Some(child) = transitions.get(name) {
            return child.clone();
        }
        let name: Arc<str> = Arc::from(name);
        let child = Arc::new(Shape {
            id: ShapeId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            parent: Some(from.clone()),
            added: Some((name.clone(), from.slot_count)),
            slot_count: from.slot_count + 1,
            transitions: RwLock::new(fast_map_new()),
        });
        transitions.insert(name, child.clone());
        child
    }
}
