//! Node mirrors
//!
//! A mirror is the per-instance wrapper the bridge hands to the script
//! engine: one live node handle plus its kind's property table. Every entry
//! point validates liveness first, so a mirror that outlives its node fails
//! with `StaleNode` instead of touching recycled state.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle, NodeKind};

use crate::{PropertyError, PropertyTable, ScriptValue};

/// Script-facing wrapper for one form node
pub struct NodeMirror {
    doc: Rc<RefCell<FomDocument>>,
    handle: NodeHandle,
    kind: NodeKind,
    table: Arc<PropertyTable>,
}

impl NodeMirror {
    pub(crate) fn new(
        doc: Rc<RefCell<FomDocument>>,
        handle: NodeHandle,
        kind: NodeKind,
        table: Arc<PropertyTable>,
    ) -> Self {
        Self {
            doc,
            handle,
            kind,
            table,
        }
    }

    /// Handle of the wrapped node
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Kind the wrapper was constructed for
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Read a property. Re-reads current node state on every call.
    pub fn get(&self, name: &str) -> Result<ScriptValue, PropertyError> {
        let doc = self.doc.borrow();
        if !doc.is_live(self.handle) {
            return Err(PropertyError::StaleNode);
        }
        let desc = self
            .table
            .resolve(name)
            .ok_or_else(|| PropertyError::UnknownProperty {
                name: name.to_string(),
            })?;
        desc.get(&doc, self.handle)
    }

    /// Write a property. A failed conversion leaves node state untouched.
    pub fn set(&self, name: &str, value: ScriptValue) -> Result<(), PropertyError> {
        let mut doc = self.doc.borrow_mut();
        if !doc.is_live(self.handle) {
            return Err(PropertyError::StaleNode);
        }
        let desc = self
            .table
            .resolve(name)
            .ok_or_else(|| PropertyError::UnknownProperty {
                name: name.to_string(),
            })?;
        desc.set(&mut doc, self.handle, value)
    }

    /// Whether the property resolves anywhere along the table chain.
    /// Always false for a stale mirror.
    pub fn has(&self, name: &str) -> bool {
        if !self.doc.borrow().is_live(self.handle) {
            return false;
        }
        self.table.resolve(name).is_some()
    }
}
