//! Fibonacci heap keyed by value.
//!
//! A Fibonacci heap is a mergeable priority queue with:
//! - O(1) amortized push, increase-priority, and meld
//! - O(log n) amortized pop and delete
//!
//! The structure is a forest of heap-ordered trees. Roots are linked in a
//! circular doubly-linked ring and the heap keeps a cursor (the *head*) on a
//! root of maximal priority. Unlike a handle-based heap, every entry here is
//! addressed by its **value**: a hash index maps each value to the node that
//! owns it, so priority changes and arbitrary deletes take a value, not an
//! opaque handle. Values are unique within a heap.
//!
//! # Algorithm Overview
//!
//! - **Push**: splice a singleton tree into the root ring.
//! - **Pop**: foster the head's children out as roots, excise the head, then
//!   consolidate so that no two roots share a degree.
//! - **Increase-priority**: overwrite in place; when the new priority
//!   outranks the parent, cut the node to the root ring and cascade cuts up
//!   through marked ancestors.
//! - **Meld**: concatenate the two root rings.
//!
//! # Key Invariants
//!
//! 1. **Heap order**: no child outranks its parent.
//! 2. **Root marks**: no root carries the bereavement mark.
//! 3. **Degree**: after consolidation, at most one root per degree, and a
//!    tree whose root has degree k holds at least F_{k+2} nodes.
//! 4. **Index**: the value index holds exactly one entry per live node.
//!
//! The marking rule is what keeps the trees fat enough for the logarithmic
//! bounds: a non-root may lose one child and is merely marked *bereaved*;
//! losing a second child cuts it to the root ring, and the cut cascades
//! through every marked ancestor.
//!
//! # Ordering and the sentinel
//!
//! The caller supplies the ordering as a strict connected relation
//! `higher(x, y)`, true iff `x` is strictly higher priority than `y`.
//! Priority equality is derived from it by double negation, never from `Eq`.
//! The caller also reserves one *sentinel* priority that outranks every
//! priority it will ever push; `delete` raises its victim to the sentinel to
//! float it to the head, which is why pushes of the sentinel are rejected.

use std::fmt::Debug;
use std::hash::Hash;
use std::mem;
use std::ptr::NonNull;

use rustc_hash::FxHashMap;

use crate::error::HeapError;
use crate::node::Node;

/// Mergeable priority queue over unique values.
///
/// `V` is the value (the key into the heap), `P` the priority, and `F` the
/// caller's `higher(x, y)` relation. The heap is single-threaded by
/// construction; share it across threads only behind an external lock.
///
/// # Example
///
/// ```rust
/// use fibqueue::FibonacciHeap;
///
/// # fn main() -> Result<(), fibqueue::HeapError> {
/// // A min-heap over i64 priorities; i64::MIN is reserved for deletes.
/// let mut heap = FibonacciHeap::new(|a: &i64, b: &i64| a < b, i64::MIN);
/// heap.push("compact", 20)?;
/// heap.push("flush", 5)?;
/// heap.increase_priority(&"compact", 1)?;
/// assert_eq!(heap.peek()?, (&"compact", &1));
/// assert_eq!(heap.pop()?, "compact");
/// heap.delete(&"flush")?;
/// assert!(heap.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct FibonacciHeap<V, P, F> {
    head: Option<NonNull<Node<V, P>>>,
    index: FxHashMap<V, NonNull<Node<V, P>>>,
    higher: F,
    sentinel: P,
}

impl<V, P, F> FibonacciHeap<V, P, F>
where
    V: Eq + Hash + Clone + Debug,
    P: Clone,
    F: Fn(&P, &P) -> bool,
{
    /// Creates an empty heap from a `higher(x, y)` relation and the reserved
    /// sentinel priority.
    ///
    /// `higher` must be a strict connected relation on the priority domain:
    /// for distinct `x`, `y` exactly one of `higher(x, y)` and `higher(y, x)`
    /// holds, and `higher(x, x)` is false. `sentinel` must outrank every
    /// priority the caller will push.
    pub fn new(higher: F, sentinel: P) -> Self {
        FibonacciHeap {
            head: None,
            index: FxHashMap::default(),
            higher,
            sentinel,
        }
    }

    /// Returns the number of entries in the heap.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if `value` is currently in the heap.
    pub fn contains(&self, value: &V) -> bool {
        self.index.contains_key(value)
    }

    /// Returns the value and priority at the head without removing them.
    pub fn peek(&self) -> Result<(&V, &P), HeapError> {
        match self.head {
            Some(head) => unsafe {
                let node = head.as_ptr();
                Ok((&(*node).value, &(*node).priority))
            },
            None => Err(HeapError::EmptyHeap),
        }
    }

    /// Inserts `value` with the given priority. O(1).
    ///
    /// Fails if the priority is the reserved sentinel or the value is
    /// already present.
    pub fn push(&mut self, value: V, priority: P) -> Result<(), HeapError> {
        if self.priorities_equal(&priority, &self.sentinel) {
            return Err(HeapError::ReservedPriority);
        }
        if self.index.contains_key(&value) {
            return Err(HeapError::ContractViolation(format!(
                "duplicate value {value:?}"
            )));
        }
        let node = Node::new(value.clone(), priority);
        self.index.insert(value, node);
        unsafe {
            match self.head {
                None => self.head = Some(node),
                Some(head) => {
                    Node::insert_left(head, node);
                    if (self.higher)(&(*node.as_ptr()).priority, &(*head.as_ptr()).priority) {
                        self.head = Some(node);
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes and returns the value at the head. O(log n) amortized.
    pub fn pop(&mut self) -> Result<V, HeapError> {
        let head = self.head.ok_or(HeapError::EmptyHeap)?;
        unsafe {
            // Foster out the head's children: each becomes an unmarked root.
            while let Some(child) = Node::pop_child(head) {
                (*child.as_ptr()).parent = None;
                (*child.as_ptr()).bereaved = false;
                Node::make_singleton(child);
                Node::insert_left(head, child);
            }
            // Excise the head from the root ring.
            let sole = (*head.as_ptr()).left == head;
            if sole {
                self.head = None;
            } else {
                let left = (*head.as_ptr()).left;
                let right = (*head.as_ptr()).right;
                (*left.as_ptr()).right = right;
                (*right.as_ptr()).left = left;
                self.head = Some(right);
            }
            let node = Box::from_raw(head.as_ptr());
            self.index.remove(&node.value);
            if !sole {
                self.consolidate();
            }
            Ok(node.value)
        }
    }

    /// Raises `value`'s priority. O(1) amortized.
    ///
    /// Only monotone improvement is permitted: the new priority must not be
    /// outranked by the current one (re-asserting an equal priority is a
    /// no-op). Fails on an empty heap, on the reserved sentinel, on an
    /// absent value, and on a non-improving priority.
    pub fn increase_priority(&mut self, value: &V, priority: P) -> Result<(), HeapError> {
        if self.head.is_none() {
            return Err(HeapError::EmptyHeap);
        }
        if self.priorities_equal(&priority, &self.sentinel) {
            return Err(HeapError::ReservedPriority);
        }
        self.raise_priority(value, priority)
    }

    /// Removes `value` from the heap. O(log n) amortized.
    ///
    /// The value's priority is raised to the sentinel, floating it to the
    /// head, and the head is popped.
    pub fn delete(&mut self, value: &V) -> Result<(), HeapError> {
        if self.head.is_none() {
            return Err(HeapError::EmptyHeap);
        }
        self.raise_priority(value, self.sentinel.clone())?;
        self.pop().map(drop)
    }

    /// Drains `other` into this heap. O(min(n, m)) for the disjointness
    /// scan; the structural splice is O(1).
    ///
    /// Fails if the value sets intersect, in which case neither heap is
    /// touched. On success `other` is left empty. Both heaps must order
    /// priorities identically; this is the caller's responsibility.
    pub fn meld(&mut self, other: &mut Self) -> Result<(), HeapError> {
        // Scan the smaller index against the larger.
        let (small, large) = if self.index.len() <= other.index.len() {
            (&self.index, &other.index)
        } else {
            (&other.index, &self.index)
        };
        for value in small.keys() {
            if large.contains_key(value) {
                return Err(HeapError::ContractViolation(format!(
                    "heaps share value {value:?}"
                )));
            }
        }
        let Some(theirs) = other.head.take() else {
            return Ok(());
        };
        self.index.extend(other.index.drain());
        unsafe {
            match self.head {
                None => self.head = Some(theirs),
                Some(ours) => {
                    // Concatenate the two root rings.
                    let ours_left = (*ours.as_ptr()).left;
                    let theirs_left = (*theirs.as_ptr()).left;
                    (*ours_left.as_ptr()).right = theirs;
                    (*theirs.as_ptr()).left = ours_left;
                    (*theirs_left.as_ptr()).right = ours;
                    (*ours.as_ptr()).left = theirs_left;
                    if (self.higher)(&(*theirs.as_ptr()).priority, &(*ours.as_ptr()).priority) {
                        self.head = Some(theirs);
                    }
                }
            }
        }
        Ok(())
    }

    /// Priority equality is derived from the comparator: with a connected
    /// relation, `!higher(a, b) && !higher(b, a)` holds exactly when a = b.
    fn priorities_equal(&self, a: &P, b: &P) -> bool {
        !(self.higher)(a, b) && !(self.higher)(b, a)
    }

    /// Internal form of [`increase_priority`](Self::increase_priority),
    /// shared with `delete`: the sentinel priority is allowed through.
    fn raise_priority(&mut self, value: &V, priority: P) -> Result<(), HeapError> {
        let x = match self.index.get(value) {
            Some(&node) => node,
            None => {
                return Err(HeapError::ContractViolation(format!(
                    "value {value:?} missing from heap"
                )))
            }
        };
        unsafe {
            if (self.higher)(&(*x.as_ptr()).priority, &priority) {
                return Err(HeapError::ContractViolation(format!(
                    "current priority of value {value:?} outranks the requested one"
                )));
            }
            (*x.as_ptr()).priority = priority;
            if let Some(y) = (*x.as_ptr()).parent {
                if (self.higher)(&(*x.as_ptr()).priority, &(*y.as_ptr()).priority) {
                    self.cut(x, y);
                    self.cascading_cut(y);
                }
            }
            if let Some(head) = self.head {
                if (self.higher)(&(*x.as_ptr()).priority, &(*head.as_ptr()).priority) {
                    self.head = Some(x);
                }
            }
        }
        Ok(())
    }

    /// Reduces the root ring to at most one root per degree.
    ///
    /// Walks the ring exactly once, linking same-degree roots with the
    /// higher-priority root as the winner, then rebuilds the ring from the
    /// degree slots and re-elects the head. The `⌈log₂ n⌉` slot estimate is
    /// an over-approximation of the usual case, not a guaranteed bound (the
    /// true bound is the golden-ratio logarithm), so the slot array grows on
    /// demand instead of being trusted.
    unsafe fn consolidate(&mut self) {
        let Some(start) = self.head else { return };
        let estimate = (self.index.len() as f64).log2().ceil() as usize;
        let mut slots: Vec<Option<NonNull<Node<V, P>>>> = vec![None; estimate + 1];

        // The walk visits each original root once: `next` is saved before any
        // link, and a root can only be linked away after it has been visited.
        let end = (*start.as_ptr()).left;
        let mut w = start;
        loop {
            let next = (*w.as_ptr()).right;
            let mut x = w;
            let mut d = (*x.as_ptr()).degree;
            loop {
                if d >= slots.len() {
                    slots.resize(d + 1, None);
                }
                let Some(mut y) = slots[d] else { break };
                if (self.higher)(&(*y.as_ptr()).priority, &(*x.as_ptr()).priority) {
                    mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                slots[d] = None;
                d += 1;
            }
            slots[d] = Some(x);
            if w == end {
                break;
            }
            w = next;
        }

        // Rebuild the root ring from the slots, keeping the best as head.
        self.head = None;
        for root in slots.into_iter().flatten() {
            // A survivor may still be spliced to other former roots.
            let left = (*root.as_ptr()).left;
            let right = (*root.as_ptr()).right;
            (*left.as_ptr()).right = right;
            (*right.as_ptr()).left = left;
            Node::make_singleton(root);
            match self.head {
                None => self.head = Some(root),
                Some(head) => {
                    Node::insert_left(head, root);
                    if (self.higher)(&(*root.as_ptr()).priority, &(*head.as_ptr()).priority) {
                        self.head = Some(root);
                    }
                }
            }
        }
    }

    /// Detaches `child` from the root ring and links it under `parent`,
    /// clearing its mark.
    unsafe fn link(&mut self, child: NonNull<Node<V, P>>, parent: NonNull<Node<V, P>>) {
        let left = (*child.as_ptr()).left;
        let right = (*child.as_ptr()).right;
        (*left.as_ptr()).right = right;
        (*right.as_ptr()).left = left;
        Node::make_singleton(child);
        Node::insert_child(parent, child);
        (*child.as_ptr()).bereaved = false;
    }

    /// Severs `x` from its parent `y` and promotes it to an unmarked root.
    unsafe fn cut(&mut self, x: NonNull<Node<V, P>>, y: NonNull<Node<V, P>>) {
        Node::remove_child(y, x);
        Node::make_singleton(x);
        (*x.as_ptr()).parent = None;
        (*x.as_ptr()).bereaved = false;
        match self.head {
            Some(head) => Node::insert_left(head, x),
            None => self.head = Some(x),
        }
    }

    /// Walks up from a node that just lost a child: an unmarked ancestor is
    /// marked bereaved, a marked one is cut and the walk continues from its
    /// parent. Roots stop the walk.
    unsafe fn cascading_cut(&mut self, y: NonNull<Node<V, P>>) {
        let Some(z) = (*y.as_ptr()).parent else { return };
        if !(*y.as_ptr()).bereaved {
            (*y.as_ptr()).bereaved = true;
        } else {
            self.cut(y, z);
            self.cascading_cut(z);
        }
    }
}

impl<V, P, F> Drop for FibonacciHeap<V, P, F> {
    fn drop(&mut self) {
        // The index holds exactly one entry per live node.
        for (_, node) in self.index.drain() {
            unsafe { drop(Box::from_raw(node.as_ptr())) };
        }
    }
}
