//! Slot arena with stable integer handles.
//!
//! Values live in a `Vec` of optional slots and are addressed by [`SlotId`].
//! Freed slots go onto a free list and are handed out again by the next
//! insert, so a long-running cache with a fixed capacity stops allocating once
//! it has filled up.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Vec<Option<T>>
//!   ┌───────┬───────┬───────┬───────┬───────┐
//!   │ 0: A  │ 1: B  │ 2: -  │ 3: D  │ 4: -  │
//!   └───────┴───────┴───────┴───────┴───────┘
//!   free_list: [4, 2]   (LIFO: next insert reuses slot 2)
//! ```
//!
//! Indexing with `arena[id]` panics on a vacant slot. List code uses it only
//! on handles reachable from live links, where a vacant slot would mean the
//! links themselves are corrupt.

use std::ops::{Index, IndexMut};

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a freed slot if one exists.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Frees the slot and returns its value; `None` if already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Iterates occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<SlotId> for SlotArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: SlotId) -> &T {
        match self.slots.get(id.0) {
            Some(Some(value)) => value,
            _ => panic!("vacant arena slot {}", id.0),
        }
    }
}

impl<T> IndexMut<SlotId> for SlotArena<T> {
    #[inline]
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        match self.slots.get_mut(id.0) {
            Some(Some(value)) => value,
            _ => panic!("vacant arena slot {}", id.0),
        }
    }
}
