//! The node layer: the intrusive record behind every heap entry and the
//! circular sibling-ring primitives the heap layer is built on.
//!
//! Siblings form a non-empty circular doubly-linked ring. `left` and `right`
//! are never null; a detached node loops onto itself. The entry point into a
//! ring (the heap's head, or a parent's `children` pointer) is an arbitrary
//! member of that ring, and rotating it to another member is invisible to
//! the heap layer.
//!
//! Nothing here consults priorities or the value index. Every operation is a
//! constant-time pointer splice; preconditions are structural and expressed
//! as `debug_assert!`, since violating them is a bug in the heap layer
//! rather than a recoverable condition.

use std::ptr::NonNull;

pub(crate) struct Node<V, P> {
    pub(crate) value: V,
    pub(crate) priority: P,
    /// True iff this node has lost a child since it last became the child
    /// of its current parent.
    pub(crate) bereaved: bool,
    pub(crate) parent: Option<NonNull<Node<V, P>>>,
    /// An arbitrary child serving as the entry point into the child ring.
    pub(crate) children: Option<NonNull<Node<V, P>>>,
    pub(crate) left: NonNull<Node<V, P>>,
    pub(crate) right: NonNull<Node<V, P>>,
    /// Number of members in the child ring.
    pub(crate) degree: usize,
}

impl<V, P> Node<V, P> {
    /// Allocates a detached singleton: no parent, no children, unmarked,
    /// with the sibling pointers looped back onto itself.
    pub(crate) fn new(value: V, priority: P) -> NonNull<Node<V, P>> {
        let node = Box::into_raw(Box::new(Node {
            value,
            priority,
            bereaved: false,
            parent: None,
            children: None,
            left: NonNull::dangling(), // set immediately below
            right: NonNull::dangling(),
            degree: 0,
        }));
        let ptr = unsafe { NonNull::new_unchecked(node) };
        unsafe {
            (*node).left = ptr;
            (*node).right = ptr;
        }
        ptr
    }

    /// Loops `this`'s sibling pointers back onto itself. Old neighbours are
    /// not updated; callers splice those out first.
    ///
    /// # Safety
    ///
    /// `this` must point to a live node.
    pub(crate) unsafe fn make_singleton(this: NonNull<Node<V, P>>) {
        (*this.as_ptr()).left = this;
        (*this.as_ptr()).right = this;
    }

    /// Splices `other` into the ring immediately left of `this`.
    ///
    /// `other`'s old neighbours are not updated, so the caller detaches it
    /// first; the standard usage is that `other` is a singleton.
    ///
    /// # Safety
    ///
    /// Both pointers must point to live nodes, and `this` must be a member
    /// of a well-formed ring.
    pub(crate) unsafe fn insert_left(this: NonNull<Node<V, P>>, other: NonNull<Node<V, P>>) {
        let left = (*this.as_ptr()).left;
        (*left.as_ptr()).right = other;
        (*other.as_ptr()).left = left;
        (*other.as_ptr()).right = this;
        (*this.as_ptr()).left = other;
    }

    /// Splices `child` into `parent`'s child ring, or makes it the entry
    /// point if the ring was empty. Sets `child.parent` and increments
    /// `parent.degree`.
    ///
    /// # Safety
    ///
    /// Both pointers must point to live nodes; `child` must be an orphan
    /// singleton.
    pub(crate) unsafe fn insert_child(parent: NonNull<Node<V, P>>, child: NonNull<Node<V, P>>) {
        debug_assert!(
            (*child.as_ptr()).parent.is_none(),
            "child already has a parent"
        );
        debug_assert!((*child.as_ptr()).left == child, "child is not a singleton");
        match (*parent.as_ptr()).children {
            Some(entry) => Node::insert_left(entry, child),
            None => (*parent.as_ptr()).children = Some(child),
        }
        (*child.as_ptr()).parent = Some(parent);
        (*parent.as_ptr()).degree += 1;
    }

    /// Detaches `child` from `parent`'s child ring and decrements
    /// `parent.degree`. If `child` was the entry point, the entry point
    /// rotates to `child.right`, or clears when `child` was the sole child.
    /// `child.parent` and `child`'s own sibling pointers are left for the
    /// caller to reset.
    ///
    /// # Safety
    ///
    /// Both pointers must point to live nodes; `child` must be a member of
    /// `parent`'s child ring.
    pub(crate) unsafe fn remove_child(parent: NonNull<Node<V, P>>, child: NonNull<Node<V, P>>) {
        debug_assert!((*parent.as_ptr()).children.is_some(), "barren node");
        debug_assert!(
            (*child.as_ptr()).parent == Some(parent),
            "child is unrelated to this node"
        );
        (*parent.as_ptr()).degree -= 1;
        if (*parent.as_ptr()).children == Some(child) {
            // Either sibling would do as the new entry point.
            (*parent.as_ptr()).children = Some((*child.as_ptr()).right);
        }
        if (*child.as_ptr()).left == child {
            (*parent.as_ptr()).children = None;
        } else {
            let left = (*child.as_ptr()).left;
            let right = (*child.as_ptr()).right;
            (*left.as_ptr()).right = right;
            (*right.as_ptr()).left = left;
        }
    }

    /// Removes and returns an arbitrary child (the entry point's left
    /// sibling), or `None` when the child ring is exhausted. Drain loops
    /// stop on `None`.
    ///
    /// # Safety
    ///
    /// `parent` must point to a live node.
    pub(crate) unsafe fn pop_child(parent: NonNull<Node<V, P>>) -> Option<NonNull<Node<V, P>>> {
        let entry = (*parent.as_ptr()).children?;
        let child = (*entry.as_ptr()).left;
        Node::remove_child(parent, child);
        Some(child)
    }
}
