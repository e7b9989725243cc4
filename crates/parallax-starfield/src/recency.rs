//! Index-based doubly linked list ordering keys from least to most recently
//! touched.
//!
//! Nodes live in a slot vector and refer to each other by index, so moving a
//! key to the back and popping the front are O(1) without per-node
//! allocation. Freed slots are reused.

const NIL: usize = usize::MAX;

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    prev: usize,
    next: usize,
}

/// Handle to a key's node, returned by [`RecencyList::push_back`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot(usize);

#[derive(Clone, Debug)]
pub struct RecencyList<K> {
    nodes: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<K: Copy> RecencyList<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Least recently touched key.
    pub fn front(&self) -> Option<K> {
        self.node(self.head).map(|n| n.key)
    }

    /// Most recently touched key.
    pub fn back(&self) -> Option<K> {
        self.node(self.tail).map(|n| n.key)
    }

    /// Append `key` as the most recently touched entry.
    pub fn push_back(&mut self, key: K) -> Slot {
        let node = Node {
            key,
            prev: self.tail,
            next: NIL,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        match self.node_mut(self.tail) {
            Some(tail) => tail.next = index,
            None => self.head = index,
        }
        self.tail = index;
        self.len += 1;
        Slot(index)
    }

    /// Mark the entry at `slot` as most recently touched.
    pub fn move_to_back(&mut self, slot: Slot) {
        if slot.0 == self.tail || self.node(slot.0).is_none() {
            return;
        }
        self.unlink(slot.0);
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(slot.0) {
            node.prev = old_tail;
            node.next = NIL;
        }
        match self.node_mut(old_tail) {
            Some(tail) => tail.next = slot.0,
            None => self.head = slot.0,
        }
        self.tail = slot.0;
    }

    /// Remove and return the least recently touched key.
    pub fn pop_front(&mut self) -> Option<K> {
        let head = self.head;
        self.remove(Slot(head))
    }

    /// Remove the entry at `slot`, returning its key.
    pub fn remove(&mut self, slot: Slot) -> Option<K> {
        self.node(slot.0)?;
        self.unlink(slot.0);
        let node = self.nodes[slot.0].take()?;
        self.free.push(slot.0);
        self.len -= 1;
        Some(node.key)
    }

    /// Keys from least to most recently touched.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.node(cursor)?;
            cursor = node.next;
            Some(node.key)
        })
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    fn node(&self, index: usize) -> Option<&Node<K>> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<K>> {
        self.nodes.get_mut(index).and_then(Option::as_mut)
    }

    /// Detach `index` from its neighbours, leaving its own links stale.
    fn unlink(&mut self, index: usize) {
        let Some(&Node { prev, next, .. }) = self.node(index) else {
            return;
        };
        match self.node_mut(prev) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match self.node_mut(next) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }
    }
}

impl<K: Copy> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}
