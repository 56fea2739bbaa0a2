//! Document - High-level form document API

use crate::{AttrValue, FomTree, InternedString, NodeHandle, NodeKind, TreeError};

/// A loaded form document: one tree with a template root
pub struct FomDocument {
    tree: FomTree,
    root: NodeHandle,
}

impl FomDocument {
    /// Create a new document with an empty template root
    pub fn new() -> Self {
        let mut tree = FomTree::new();
        let root = tree.create_node(NodeKind::Template, None);
        Self { tree, root }
    }

    /// The template root
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Create a detached node
    pub fn create_node(&mut self, kind: NodeKind, name: Option<&str>) -> NodeHandle {
        self.tree.create_node(kind, name)
    }

    /// Append `child` under `parent`
    pub fn append(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), TreeError> {
        self.tree.append_child(parent, child)
    }

    /// Remove a node and its subtree. Handles into the subtree go stale;
    /// this is the teardown notification wrappers rely on.
    pub fn remove_node(&mut self, h: NodeHandle) -> Result<usize, TreeError> {
        if h == self.root {
            return Err(TreeError::IsRoot);
        }
        self.tree.remove_subtree(h)
    }

    /// Check whether a handle still refers to a live node
    pub fn is_live(&self, h: NodeHandle) -> bool {
        self.tree.is_live(h)
    }

    /// Kind of a node (None when stale)
    pub fn kind_of(&self, h: NodeHandle) -> Option<NodeKind> {
        self.tree.node(h).map(|n| n.kind)
    }

    /// Template-declared name of a node
    pub fn name_of(&self, h: NodeHandle) -> Option<&str> {
        let name = self.tree.node(h)?.name?;
        Some(self.tree.resolve(name))
    }

    /// Rename a node
    pub fn set_name(&mut self, h: NodeHandle, name: &str) -> Result<(), TreeError> {
        let interned = self.tree.intern(name);
        match self.tree.node_mut(h) {
            Some(n) => {
                n.name = Some(interned);
                Ok(())
            }
            None => Err(TreeError::NotFound),
        }
    }

    /// Handle of a node's parent, if attached
    pub fn parent_of(&self, h: NodeHandle) -> Option<NodeHandle> {
        self.tree.parent_of(h)
    }

    /// First node (document order) whose declared name matches
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        let key = self.tree.interner().lookup(name)?;
        self.find_named(self.root, key)
    }

    fn find_named(&self, start: NodeHandle, key: InternedString) -> Option<NodeHandle> {
        for child in self.tree.children(start) {
            if self.tree.node(child).and_then(|n| n.name) == Some(key) {
                return Some(child);
            }
            if let Some(found) = self.find_named(child, key) {
                return Some(found);
            }
        }
        None
    }

    /// Read an attribute by name
    pub fn attr(&self, h: NodeHandle, name: &str) -> Option<&AttrValue> {
        self.tree.attr(h, name)
    }

    /// Write an attribute by name
    pub fn set_attr(&mut self, h: NodeHandle, name: &str, value: AttrValue) -> Result<(), TreeError> {
        self.tree.set_attr(h, name, value)
    }

    /// Access the tree
    pub fn tree(&self) -> &FomTree {
        &self.tree
    }

    /// Access the tree mutably
    pub fn tree_mut(&mut self) -> &mut FomTree {
        &mut self.tree
    }
}

impl Default for FomDocument {
    fn default() -> Self {
        Self::new()
    }
}
