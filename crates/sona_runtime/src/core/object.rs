//! Script objects.
//!
//! An object starts out shaped: its layout is an `Arc<Shape>` and its
//! property values live in a dense slot vector indexed by the shape.
//! Removing a property has no shape transition, so the object migrates
//! to a generic ordered-map representation and stays there.

use std::cell::RefCell;
use std::sync::Arc;

use indexmap::IndexMap;

use super::shape::{Shape, ShapeId, ShapeTable};
use super::value::Value;

enum Repr {
    Shaped { shape: Arc<Shape>, slots: Vec<Value> },
    Generic(IndexMap<Arc<str>, Value>),
}

pub struct ScriptObject {
    repr: RefCell<Repr>,
}

impl ScriptObject {
    /// Empty object with the table's root shape.
    pub fn new(table: &ShapeTable) -> Self {
        ScriptObject {
            repr: RefCell::new(Repr::Shaped {
                shape: table.empty(),
                slots: Vec::new(),
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match &*self.repr.borrow() {
            Repr::Shaped { shape, slots } => {
                let slot = shape.slot_of(name)?;
                Some(slots[slot as usize].clone())
            }
            Repr::Generic(map) => map.get(name).cloned(),
        }
    }

    /// Set `name` to `value`, transitioning the shape when the property
    /// is new.
    pub fn set(&self, table: &ShapeTable, name: &str, value: Value) {
        let mut repr = self.repr.borrow_mut();
        match &mut *repr {
            Repr::Shaped { shape, slots } => {
                if let Some(slot) = shape.slot_of(name) {
                    slots[slot as usize] = value;
                } else {
                    *shape = table.transition(shape, name);
                    slots.push(value);
                }
            }
            Repr::Generic(map) => {
                map.insert(Arc::from(name), value);
            }
        }
    }

    /// Remove a property. Returns whether it was present. A shaped
    /// object that loses a property migrates to the generic
    /// representation, preserving insertion order of the rest.
    pub fn remove(&self, name: &str) -> bool {
        let mut repr = self.repr.borrow_mut();
        match &mut *repr {
            Repr::Shaped { shape, slots } => {
                if !shape.has_property(name) {
                    return false;
                }
                let mut map = IndexMap::with_capacity(slots.len() - 1);
                for (prop, value) in shape.property_names().into_iter().zip(slots.drain(..)) {
                    if prop.as_ref() != name {
                        map.insert(prop, value);
                    }
                }
                *repr = Repr::Generic(map);
                true
            }
            Repr::Generic(map) => map.shift_remove(name).is_some(),
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        match &*self.repr.borrow() {
            Repr::Shaped { shape, .. } => shape.has_property(name),
            Repr::Generic(map) => map.contains_key(name),
        }
    }

    /// Property names in insertion order.
    pub fn property_names(&self) -> Vec<Arc<str>> {
        match &*self.repr.borrow() {
            Repr::Shaped { shape, .. } => shape.property_names(),
            Repr::Generic(map) => map.keys().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match &*self.repr.borrow() {
            Repr::Shaped { slots, .. } => slots.len(),
            Repr::Generic(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current shape, `None` once the object has gone generic.
    pub fn shape(&self) -> Option<Arc<Shape>> {
        match &*self.repr.borrow() {
            Repr::Shaped { shape, .. } => Some(shape.clone()),
            Repr::Generic(_) => None,
        }
    }

    pub fn shape_id(&self) -> Option<ShapeId> {
        match &*self.repr.borrow() {
            Repr::Shaped { shape, .. } => Some(shape.id()),
            Repr::Generic(_) => None,
        }
    }

    /// Cached-slot load. Caller must have verified the shape id.
    pub(crate) fn slot_value(&self, slot: u32) -> Value {
        match &*self.repr.borrow() {
            Repr::Shaped { slots, .. } => slots[slot as usize].clone(),
            Repr::Generic(_) => unreachable!("slot load on generic object"),
        }
    }

    /// Cached-slot store into an existing slot.
    pub(crate) fn slot_store(&self, slot: u32, value: Value) {
        match &mut *self.repr.borrow_mut() {
            Repr::Shaped { slots, .. } => slots[slot as usize] = value,
            Repr::Generic(_) => unreachable!("slot store on generic object"),
        }
    }

    /// Cached transition store: append a slot and adopt the cached
    /// child shape. Caller must have verified the current shape id.
    pub(crate) fn push_transition(&self, to: &Arc<Shape>, value: Value) {
        match &mut *self.repr.borrow_mut() {
            Repr::Shaped { shape, slots } => {
                slots.push(value);
                *shape = to.clone();
            }
            Repr::Generic(_) => unreachable!("transition store on generic object"),
        }
    }
}
