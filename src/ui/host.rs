// SPDX-License-Identifier: MPL-2.0
//! Minimal host element model.
//!
//! A [`Host`] is the container a resizer inserts its drawing surface into.
//! It only tracks the ordered list of child node ids, which is all the
//! resizer needs to attach and detach itself. Handles are cheap to clone and
//! refer to the same element.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a node placed inside a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocates a process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct HostInner {
    id: NodeId,
    children: Vec<NodeId>,
}

/// Shared handle to a host element.
#[derive(Debug, Clone)]
pub struct Host {
    inner: Rc<RefCell<HostInner>>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HostInner {
                id: NodeId::next(),
                children: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.inner.borrow().id
    }

    /// Whether both handles point at the same element.
    #[must_use]
    pub fn same_as(&self, other: &Host) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Child ids in document order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        self.inner.borrow().children.clone()
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.inner.borrow().children.contains(&node)
    }

    /// Inserts `node` before every existing child.
    pub fn insert_first(&self, node: NodeId) {
        self.inner.borrow_mut().children.insert(0, node);
    }

    /// Appends `node` after every existing child.
    pub fn append(&self, node: NodeId) {
        self.inner.borrow_mut().children.push(node);
    }

    /// Removes `node`, returning whether it was present.
    pub fn remove_child(&self, node: NodeId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.children.len();
        inner.children.retain(|child| *child != node);
        inner.children.len() != before
    }
}
