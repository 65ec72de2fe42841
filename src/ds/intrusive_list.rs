//! Intrusive doubly linked lists backed by a `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`SlotId`]. Every
//! list owns two sentinel nodes (head and tail) that never hold a value and are
//! never unlinked, so splicing a node in or out never has to ask whether it is
//! at an end of the list.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ 0      │ { value: None,    prev: 0,    next: id_2 }   │  head sentinel
//!   │ 1      │ { value: None,    prev: id_3, next: 1 }      │  tail sentinel
//!   │ id_2   │ { value: Some(A), prev: 0,    next: id_3 }   │
//!   │ id_3   │ { value: Some(B), prev: id_2, next: 1 }      │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   [head] ◄──► [A] ◄──► [B] ◄──► [tail]
//!   front (most recent)        back (least recent)
//! ```
//!
//! [`ListArena`] hosts any number of lists in one arena; each call to
//! [`ListArena::create_list`] allocates a fresh sentinel pair. Because unlinking
//! only needs the node's own neighbours, a node can be moved from one list to
//! another in O(1), which is what the LFU frequency buckets rely on.
//!
//! [`IntrusiveList`] is the single-list form. Its sentinels are the first two
//! slots of its arena (ids 0 and 1).
//!
//! ## Operations
//!
//! | Operation        | Time | Notes                                   |
//! |------------------|------|-----------------------------------------|
//! | `push_front`     | O(1) | link after the head sentinel            |
//! | `remove`         | O(1) | by handle, no traversal                 |
//! | `move_to_front`  | O(1) | unlink + link after head                |
//! | `front` / `back` | O(1) | neighbours of the sentinels             |
//! | `iter`           | O(n) | front to back                           |

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Placeholder link used while a sentinel pair is being wired up.
const UNLINKED: SlotId = SlotId(usize::MAX);

#[derive(Debug)]
struct Node<T> {
    prev: SlotId,
    next: SlotId,
    value: Option<T>,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            prev: UNLINKED,
            next: UNLINKED,
            value: None,
        }
    }
}

/// Handle naming one list inside a [`ListArena`]: its two sentinel slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListHandle {
    head: SlotId,
    tail: SlotId,
}

impl ListHandle {
    /// Slot of the head sentinel.
    pub fn head(self) -> SlotId {
        self.head
    }

    /// Slot of the tail sentinel.
    pub fn tail(self) -> SlotId {
        self.tail
    }
}

/// Arena that stores the nodes of many sentinel-delimited lists.
#[derive(Debug)]
pub struct ListArena<T> {
    arena: SlotArena<Node<T>>,
    lists: usize,
}

impl<T> ListArena<T> {
    /// Creates an empty arena with no lists.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            lists: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` nodes (sentinels included).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            lists: 0,
        }
    }

    /// Allocates a new empty list and returns its handle.
    pub fn create_list(&mut self) -> ListHandle {
        let head = self.arena.insert(Node::sentinel());
        let tail = self.arena.insert(Node::sentinel());
        {
            let node = &mut self.arena[head];
            node.prev = head;
            node.next = tail;
        }
        {
            let node = &mut self.arena[tail];
            node.prev = head;
            node.next = tail;
        }
        self.lists += 1;
        ListHandle { head, tail }
    }

    /// Frees the list's sentinels together with any nodes still linked to it.
    ///
    /// Returns the number of data nodes that were dropped.
    pub fn release_list(&mut self, list: ListHandle) -> usize {
        let mut dropped = 0;
        let mut current = self.arena[list.head].next;
        while current != list.tail {
            let next = self.arena[current].next;
            self.arena.remove(current);
            dropped += 1;
            current = next;
        }
        self.arena.remove(list.head);
        self.arena.remove(list.tail);
        self.lists -= 1;
        dropped
    }

    /// Number of data nodes across all lists.
    pub fn len(&self) -> usize {
        self.arena.len() - 2 * self.lists
    }

    /// Returns `true` if no list holds a data node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live lists.
    pub fn list_count(&self) -> usize {
        self.lists
    }

    /// Returns `true` if `list` holds no data node.
    pub fn list_is_empty(&self, list: ListHandle) -> bool {
        self.arena[list.head].next == list.tail
    }

    /// Returns `true` if `id` is a live data node (sentinels are excluded).
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena
            .get(id)
            .map(|node| node.value.is_some())
            .unwrap_or(false)
    }

    /// Returns the value stored at `id`, if it is a data node.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    /// Returns a mutable reference to the value stored at `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Returns the node adjacent to the head sentinel.
    pub fn front_id(&self, list: ListHandle) -> Option<SlotId> {
        let id = self.arena[list.head].next;
        (id != list.tail).then_some(id)
    }

    /// Returns the node adjacent to the tail sentinel.
    pub fn back_id(&self, list: ListHandle) -> Option<SlotId> {
        let id = self.arena[list.tail].prev;
        (id != list.head).then_some(id)
    }

    /// Stores `value` in a new node linked at the front of `list`.
    pub fn push_front(&mut self, list: ListHandle, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            prev: UNLINKED,
            next: UNLINKED,
            value: Some(value),
        });
        self.link_after(list.head, id);
        id
    }

    /// Unlinks `id` from whatever list holds it and frees its slot.
    ///
    /// Returns `None` for vacant slots and sentinels.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);
        self.arena.remove(id).and_then(|node| node.value)
    }

    /// Moves `id` to the front of `list`, which need not be the list that
    /// currently holds it. Returns `false` if `id` is not a data node.
    pub fn move_to_front(&mut self, list: ListHandle, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.arena[list.head].next == id {
            return true;
        }
        self.unlink(id);
        self.link_after(list.head, id);
        true
    }

    /// Iterates `(SlotId, &T)` pairs of `list` from front to back.
    pub fn iter(&self, list: ListHandle) -> ListIter<'_, T> {
        ListIter {
            arena: &self.arena,
            current: self.arena[list.head].next,
            tail: list.tail,
        }
    }

    /// Drops every list and node. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.lists = 0;
    }

    /// Walks `list` and verifies its links; returns the number of data nodes.
    pub fn check_list(&self, list: ListHandle) -> Result<usize, InvariantError> {
        let head = self
            .arena
            .get(list.head)
            .ok_or_else(|| InvariantError::new(format!("head sentinel {:?} is vacant", list.head)))?;
        let tail = self
            .arena
            .get(list.tail)
            .ok_or_else(|| InvariantError::new(format!("tail sentinel {:?} is vacant", list.tail)))?;
        if head.value.is_some() || tail.value.is_some() {
            return Err(InvariantError::new("sentinel node holds a value"));
        }

        let mut count = 0usize;
        let mut prev = list.head;
        let mut current = head.next;
        while current != list.tail {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| InvariantError::new(format!("stale link to {:?}", current)))?;
            if node.value.is_none() {
                return Err(InvariantError::new(format!(
                    "foreign sentinel {:?} linked inside list",
                    current
                )));
            }
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {:?} prev is {:?}, expected {:?}",
                    current, node.prev, prev
                )));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("list walk exceeds node count (cycle)"));
            }
            prev = current;
            current = node.next;
        }
        if tail.prev != prev {
            return Err(InvariantError::new(format!(
                "tail sentinel prev is {:?}, expected {:?}",
                tail.prev, prev
            )));
        }
        Ok(count)
    }

    fn unlink(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = &self.arena[id];
            (node.prev, node.next)
        };
        self.arena[prev].next = next;
        self.arena[next].prev = prev;
    }

    fn link_after(&mut self, anchor: SlotId, id: SlotId) {
        let next = self.arena[anchor].next;
        {
            let node = &mut self.arena[id];
            node.prev = anchor;
            node.next = next;
        }
        self.arena[next].prev = id;
        self.arena[anchor].next = id;
    }
}

impl<T> Default for ListArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(SlotId, &T)` pairs of one list, front to back.
pub struct ListIter<'a, T> {
    arena: &'a SlotArena<Node<T>>,
    current: SlotId,
    tail: SlotId,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.tail {
            return None;
        }
        let id = self.current;
        let node = self.arena.get(id)?;
        self.current = node.next;
        node.value.as_ref().map(|value| (id, value))
    }
}

/// A single intrusive list; front is the most recently pushed end.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    nodes: ListArena<T>,
    list: ListHandle,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list. Its sentinels occupy slots 0 and 1.
    pub fn new() -> Self {
        let mut nodes = ListArena::new();
        let list = nodes.create_list();
        Self { nodes, list }
    }

    /// Creates an empty list with reserved room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = ListArena::with_capacity(capacity.saturating_add(2));
        let list = nodes.create_list();
        Self { nodes, list }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` is currently a value node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.nodes.contains(id)
    }

    /// Value adjacent to the head sentinel.
    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.nodes.get(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.nodes.front_id(self.list)
    }

    /// Value adjacent to the tail sentinel.
    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.nodes.get(id))
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.nodes.back_id(self.list)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.nodes.get_mut(id)
    }

    /// Inserts `value` at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        self.nodes.push_front(self.list, value)
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.nodes.remove(id)
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.nodes.remove(id)
    }

    /// Removes the node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.nodes.remove(id)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        self.nodes.move_to_front(self.list, id)
    }

    /// Iterates values from front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter(self.list).map(|(_, value)| value)
    }

    /// Iterates handles from front to back.
    pub fn iter_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.nodes.iter(self.list).map(|(id, _)| id)
    }

    /// Iterates `(SlotId, &T)` pairs from front to back.
    pub fn iter_entries(&self) -> ListIter<'_, T> {
        self.nodes.iter(self.list)
    }

    /// Drops all values; the sentinels are re-created in slots 0 and 1.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.list = self.nodes.create_list();
    }

    /// Verifies links and that every arena node is reachable from the sentinels.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let count = self.nodes.check_list(self.list)?;
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "list walk found {} nodes but arena holds {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Panics if [`check_invariants`](Self::check_invariants) fails (debug/test only).
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("intrusive list invariant violated: {}", err);
        }
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}
