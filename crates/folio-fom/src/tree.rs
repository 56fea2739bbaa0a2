//! FOM tree (arena-based allocation)
//!
//! Slots are recycled through a free list; every removal bumps the slot
//! generation so stale handles miss instead of aliasing the new occupant.

use crate::{
    AttrValue, Generation, InternedString, Node, NodeHandle, NodeId, NodeKind, StringInterner,
};

/// Structural operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node does not exist or was removed")]
    NotFound,

    #[error("node is not a child of the given parent")]
    NotAChild,

    #[error("operation would create a cycle")]
    WouldCycle,

    #[error("the document root cannot be removed")]
    IsRoot,
}

#[derive(Debug)]
struct Slot {
    generation: Generation,
    node: Option<Node>,
}

/// Arena-based form tree
#[derive(Debug)]
pub struct FomTree {
    slots: Vec<Slot>,
    free: Vec<NodeId>,
    interner: StringInterner,
}

impl FomTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            interner: StringInterner::new(),
        }
    }

    /// Create a detached node, recycling a freed slot when one exists
    pub fn create_node(&mut self, kind: NodeKind, name: Option<&str>) -> NodeHandle {
        let name = name.map(|n| self.interner.intern(n));
        if let Some(id) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(id.index()) {
                slot.node = Some(Node::new(kind, name));
                return NodeHandle {
                    id,
                    generation: slot.generation,
                };
            }
        }
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            generation: Generation::INITIAL,
            node: Some(Node::new(kind, name)),
        });
        NodeHandle {
            id,
            generation: Generation::INITIAL,
        }
    }

    /// Check whether a handle still refers to a live node
    pub fn is_live(&self, h: NodeHandle) -> bool {
        self.node(h).is_some()
    }

    /// Get a node by handle (None when stale)
    pub fn node(&self, h: NodeHandle) -> Option<&Node> {
        let slot = self.slots.get(h.id.index())?;
        if slot.generation != h.generation {
            return None;
        }
        slot.node.as_ref()
    }

    /// Get a mutable node by handle (None when stale)
    pub fn node_mut(&mut self, h: NodeHandle) -> Option<&mut Node> {
        let slot = self.slots.get_mut(h.id.index())?;
        if slot.generation != h.generation {
            return None;
        }
        slot.node.as_mut()
    }

    /// Current handle for an arena index, if the slot is occupied
    pub fn handle_of(&self, id: NodeId) -> Option<NodeHandle> {
        let slot = self.slots.get(id.index())?;
        slot.node.as_ref()?;
        Some(NodeHandle {
            id,
            generation: slot.generation,
        })
    }

    fn get_id(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(|s| s.node.as_ref())
    }

    fn get_id_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .and_then(|s| s.node.as_mut())
    }

    /// Append `child` as the last child of `parent`, detaching it first if
    /// it is attached elsewhere
    pub fn append_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), TreeError> {
        if !self.is_live(parent) || !self.is_live(child) {
            return Err(TreeError::NotFound);
        }
        // Reject appending a node into its own subtree
        let mut cur = parent.id;
        while !cur.is_none() {
            if cur == child.id {
                return Err(TreeError::WouldCycle);
            }
            cur = self.get_id(cur).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        self.detach(child)?;

        let last = self
            .get_id(parent.id)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);
        if let Some(c) = self.get_id_mut(child.id) {
            c.parent = parent.id;
            c.prev_sibling = last;
            c.next_sibling = NodeId::NONE;
        }
        if last.is_none() {
            if let Some(p) = self.get_id_mut(parent.id) {
                p.first_child = child.id;
            }
        } else if let Some(prev) = self.get_id_mut(last) {
            prev.next_sibling = child.id;
        }
        if let Some(p) = self.get_id_mut(parent.id) {
            p.last_child = child.id;
        }
        Ok(())
    }

    /// Unlink a node from its parent; a no-op for detached nodes
    pub fn detach(&mut self, h: NodeHandle) -> Result<(), TreeError> {
        let (parent, prev, next) = match self.node(h) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return Err(TreeError::NotFound),
        };
        if parent.is_none() {
            return Ok(());
        }
        if prev.is_none() {
            if let Some(p) = self.get_id_mut(parent) {
                p.first_child = next;
            }
        } else if let Some(pv) = self.get_id_mut(prev) {
            pv.next_sibling = next;
        }
        if next.is_none() {
            if let Some(p) = self.get_id_mut(parent) {
                p.last_child = prev;
            }
        } else if let Some(nx) = self.get_id_mut(next) {
            nx.prev_sibling = prev;
        }
        if let Some(n) = self.get_id_mut(h.id) {
            n.parent = NodeId::NONE;
            n.prev_sibling = NodeId::NONE;
            n.next_sibling = NodeId::NONE;
        }
        Ok(())
    }

    /// Remove a node and its whole subtree. Every removed slot's generation
    /// is bumped, so outstanding handles into the subtree go stale.
    pub fn remove_subtree(&mut self, h: NodeHandle) -> Result<usize, TreeError> {
        self.detach(h)?;
        let mut stack = vec![h.id];
        let mut removed = 0usize;
        while let Some(id) = stack.pop() {
            // Queue children before the slot is cleared
            let mut child = self
                .get_id(id)
                .map(|n| n.first_child)
                .unwrap_or(NodeId::NONE);
            while !child.is_none() {
                stack.push(child);
                child = self
                    .get_id(child)
                    .map(|n| n.next_sibling)
                    .unwrap_or(NodeId::NONE);
            }
            if let Some(slot) = self.slots.get_mut(id.index()) {
                if slot.node.take().is_some() {
                    slot.generation = slot.generation.next();
                    self.free.push(id);
                    removed += 1;
                }
            }
        }
        tracing::debug!("removed subtree of {} node(s)", removed);
        Ok(removed)
    }

    /// Remove `child` (and its subtree) from `parent`
    pub fn remove_child(
        &mut self,
        parent: NodeHandle,
        child: NodeHandle,
    ) -> Result<usize, TreeError> {
        let actual = match self.node(child) {
            Some(n) => n.parent,
            None => return Err(TreeError::NotFound),
        };
        if !self.is_live(parent) {
            return Err(TreeError::NotFound);
        }
        if actual != parent.id {
            return Err(TreeError::NotAChild);
        }
        self.remove_subtree(child)
    }

    /// Iterate over the children of a node
    pub fn children(&self, h: NodeHandle) -> Children<'_> {
        let first = self.node(h).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children {
            tree: self,
            next: first,
        }
    }

    /// Handle of a node's parent, if attached
    pub fn parent_of(&self, h: NodeHandle) -> Option<NodeHandle> {
        let parent = self.node(h)?.parent;
        if parent.is_none() {
            None
        } else {
            self.handle_of(parent)
        }
    }

    /// Read an attribute by name
    pub fn attr(&self, h: NodeHandle, name: &str) -> Option<&AttrValue> {
        let key = self.interner.lookup(name)?;
        self.node(h)?.attr(key)
    }

    /// Write an attribute by name, replacing any previous value
    pub fn set_attr(&mut self, h: NodeHandle, name: &str, value: AttrValue) -> Result<(), TreeError> {
        let key = self.interner.intern(name);
        match self.node_mut(h) {
            Some(n) => {
                n.set_attr(key, value);
                Ok(())
            }
            None => Err(TreeError::NotFound),
        }
    }

    /// Intern a string in the tree's interner
    pub fn intern(&mut self, s: &str) -> InternedString {
        self.interner.intern(s)
    }

    /// Resolve an interned string
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.resolve(s)
    }

    /// Access the interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Number of arena slots (live or freed)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the tree has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for FomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a FomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<NodeHandle> {
        if self.next.is_none() {
            return None;
        }
        let id = self.next;
        self.next = self
            .tree
            .get_id(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        self.tree.handle_of(id)
    }
}
