//! Bindings registry
//!
//! The kind → property-table configuration. Built once at startup, in
//! dependency order (a subtype's table links to its already-built parent),
//! then immutable and shared for the life of the process. Passed explicitly
//! to the bridge so synthetic type sets stay testable.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle, NodeKind};

use crate::catalog;
use crate::{BindingsError, NodeMirror, PropertyTable};

/// Immutable kind → table configuration
#[derive(Debug)]
pub struct Bindings {
    tables: HashMap<NodeKind, Arc<PropertyTable>>,
}

impl Bindings {
    /// Start an empty configuration (synthetic type sets, tests)
    pub fn builder() -> BindingsBuilder {
        BindingsBuilder {
            tables: HashMap::new(),
        }
    }

    /// The production configuration: every `NodeKind` bound to its catalog
    /// table. Any error is a registration defect; hosts fail fast on it
    /// before running any script.
    pub fn standard() -> Result<Self, BindingsError> {
        catalog::standard()
    }

    /// Table registered for a kind.
    ///
    /// Panics for an unregistered kind: the kind set is closed at compile
    /// time, so a miss is a registration defect, not a runtime condition.
    pub fn table_for(&self, kind: NodeKind) -> &Arc<PropertyTable> {
        match self.tables.get(&kind) {
            Some(table) => table,
            None => panic!(
                "no property table registered for {:?}; registration is incomplete",
                kind
            ),
        }
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no kinds are registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Construct a wrapper for a node. Returns None when the handle is
    /// already stale - a removed node is never exposed to script.
    pub fn mirror(&self, doc: &Rc<RefCell<FomDocument>>, handle: NodeHandle) -> Option<NodeMirror> {
        let kind = doc.borrow().kind_of(handle)?;
        Some(NodeMirror::new(
            Rc::clone(doc),
            handle,
            kind,
            Arc::clone(self.table_for(kind)),
        ))
    }
}

/// Startup-time registration, in dependency order
#[derive(Debug)]
pub struct BindingsBuilder {
    tables: HashMap<NodeKind, Arc<PropertyTable>>,
}

impl BindingsBuilder {
    /// Register a kind's table. Double registration is a defect.
    pub fn table(
        mut self,
        kind: NodeKind,
        table: Arc<PropertyTable>,
    ) -> Result<Self, BindingsError> {
        if self.tables.insert(kind, table).is_some() {
            return Err(BindingsError::DuplicateKind {
                kind: kind.tag_name(),
            });
        }
        Ok(self)
    }

    /// Freeze the configuration
    pub fn build(self) -> Bindings {
        tracing::debug!("bindings frozen with {} kind(s)", self.tables.len());
        Bindings {
            tables: self.tables,
        }
    }
}
