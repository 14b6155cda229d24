//! Per-tree identity cache
//!
//! Maps an engine node id to the wrapper the host already holds for it, so
//! the same logical node always surfaces as the same object. The cache
//! never owns a wrapper: entries are `Weak`, and a wrapper's `Drop` removes
//! its own entry. The entry table lives behind an `Rc` owned by the tree;
//! once the tree is gone the wrappers' hooks find nothing to clean up.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::features::codec::{EncodedNode, NodeId};

type Entries = RefCell<FxHashMap<NodeId, Weak<NodeObject>>>;

/// Materialized wrapper for one node
#[derive(Debug)]
pub struct NodeObject {
    encoded: Cell<EncodedNode>,
    symbol: u16,
    entries: Weak<Entries>,
}

impl NodeObject {
    /// Current encoded words (refreshed when the tree is edited)
    pub fn encoded(&self) -> EncodedNode {
        self.encoded.get()
    }

    pub fn node_id(&self) -> NodeId {
        self.encoded.get().node_id()
    }

    pub fn symbol(&self) -> u16 {
        self.symbol
    }

    pub(crate) fn refresh(&self, encoded: EncodedNode) {
        debug_assert_eq!(encoded.node_id(), self.node_id());
        self.encoded.set(encoded);
    }
}

impl Drop for NodeObject {
    fn drop(&mut self) {
        let Some(entries) = self.entries.upgrade() else {
            return;
        };
        let Ok(mut entries) = entries.try_borrow_mut() else {
            // Lookups treat dead entries as misses and prune them.
            return;
        };
        let id = self.node_id();
        let ours = entries
            .get(&id)
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), self as *const NodeObject));
        if ours {
            entries.remove(&id);
            tracing::trace!(id = id.0, "identity cache entry finalized");
        }
    }
}

#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: Rc<Entries>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live wrapper for `id`, if any. A dead entry is pruned and reported as a miss.
    pub fn lookup(&self, id: NodeId) -> Option<Rc<NodeObject>> {
        let weak = self.entries.borrow().get(&id).cloned()?;
        match weak.upgrade() {
            Some(object) => Some(object),
            None => {
                self.entries.borrow_mut().remove(&id);
                None
            }
        }
    }

    /// Wrapper for `encoded`: the existing live one, or a new one registered
    /// under its id. Null handles are never cached. Callers pass words
    /// encoded from a live node of the owning tree.
    pub(crate) fn insert(&self, encoded: EncodedNode, symbol: u16) -> Option<Rc<NodeObject>> {
        if encoded.is_null() {
            return None;
        }
        let id = encoded.node_id();
        if let Some(existing) = self.lookup(id) {
            return Some(existing);
        }

        let object = Rc::new(NodeObject {
            encoded: Cell::new(encoded),
            symbol,
            entries: Rc::downgrade(&self.entries),
        });
        self.entries.borrow_mut().insert(id, Rc::downgrade(&object));
        tracing::trace!(id = id.0, symbol, "identity cache insert");
        Some(object)
    }

    /// Drop every entry. Wrappers still held elsewhere stay valid values
    /// but are no longer reachable through the cache.
    pub fn evict_all(&self) {
        let evicted = {
            let mut entries = self.entries.borrow_mut();
            let count = entries.len();
            entries.clear();
            count
        };
        if evicted > 0 {
            tracing::debug!("identity cache evicted {} entries", evicted);
        }
    }

    /// All wrappers that are still alive
    pub fn live_objects(&self) -> Vec<Rc<NodeObject>> {
        self.entries
            .borrow()
            .values()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for IdentityCache {
    fn drop(&mut self) {
        self.evict_all();
    }
}
