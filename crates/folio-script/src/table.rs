//! Property tables
//!
//! Each node kind owns one table of named accessor descriptors, built once at
//! startup from a static declaration list. Tables chain to their supertype's
//! table; resolution walks the chain so the most-derived declaration wins.

use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle};

use crate::{BindingsError, PropertyError, ScriptValue};

/// Native getter invoked against the wrapped node
pub type PropertyGetter = fn(&FomDocument, NodeHandle) -> Result<ScriptValue, PropertyError>;

/// Native setter invoked against the wrapped node
pub type PropertySetter = fn(&mut FomDocument, NodeHandle, ScriptValue) -> Result<(), PropertyError>;

/// One named property: a getter and, for writable properties, a setter.
/// Immutable after table construction.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: &'static str,
    getter: PropertyGetter,
    setter: Option<PropertySetter>,
}

impl PropertyDescriptor {
    /// Property name as script sees it
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the property has no setter
    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }

    /// Invoke the getter
    pub fn get(&self, doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
        (self.getter)(doc, node)
    }

    /// Invoke the setter; read-only descriptors reject the write
    pub fn set(
        &self,
        doc: &mut FomDocument,
        node: NodeHandle,
        value: ScriptValue,
    ) -> Result<(), PropertyError> {
        match self.setter {
            Some(setter) => setter(doc, node, value),
            None => Err(PropertyError::ReadOnlyProperty {
                name: self.name.to_string(),
            }),
        }
    }
}

/// Per-kind property table with an inheritance link to its supertype's table
#[derive(Debug)]
pub struct PropertyTable {
    label: &'static str,
    own: Vec<PropertyDescriptor>,
    parent: Option<Arc<PropertyTable>>,
}

impl PropertyTable {
    /// Start declaring a table. `label` names the type for diagnostics.
    pub fn builder(label: &'static str) -> TableBuilder {
        TableBuilder {
            label,
            own: Vec::new(),
            parent: None,
        }
    }

    /// Diagnostic label of the type this table belongs to
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The supertype's table, if this is not the root of the chain
    pub fn parent(&self) -> Option<&Arc<PropertyTable>> {
        self.parent.as_ref()
    }

    /// Resolve a property name: own descriptors first, then up the chain.
    /// The nearest declaration always wins, which is what lets a subtype
    /// shadow a supertype property.
    pub fn resolve(&self, name: &str) -> Option<&PropertyDescriptor> {
        if let Some(desc) = self.own.iter().find(|d| d.name == name) {
            return Some(desc);
        }
        self.parent.as_deref()?.resolve(name)
    }

    /// Descriptors declared directly on this table
    pub fn own(&self) -> &[PropertyDescriptor] {
        &self.own
    }

    /// Effective property names: own plus inherited, shadowed names listed
    /// once at their most-derived position
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        let mut table = Some(self);
        while let Some(t) = table {
            for desc in &t.own {
                if !names.contains(&desc.name) {
                    names.push(desc.name);
                }
            }
            table = t.parent.as_deref();
        }
        names
    }
}

/// Declares one table, then validates it. Construction happens once at
/// startup; a duplicate name inside a single table aborts it.
pub struct TableBuilder {
    label: &'static str,
    own: Vec<PropertyDescriptor>,
    parent: Option<Arc<PropertyTable>>,
}

impl TableBuilder {
    /// Chain to the supertype's already-built table
    pub fn parent(mut self, parent: &Arc<PropertyTable>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Declare a read-only property
    pub fn property(mut self, name: &'static str, getter: PropertyGetter) -> Self {
        self.own.push(PropertyDescriptor {
            name,
            getter,
            setter: None,
        });
        self
    }

    /// Declare a read/write property
    pub fn property_rw(
        mut self,
        name: &'static str,
        getter: PropertyGetter,
        setter: PropertySetter,
    ) -> Self {
        self.own.push(PropertyDescriptor {
            name,
            getter,
            setter: Some(setter),
        });
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> Result<Arc<PropertyTable>, BindingsError> {
        for (i, desc) in self.own.iter().enumerate() {
            if self.own[..i].iter().any(|d| d.name == desc.name) {
                return Err(BindingsError::DuplicateProperty {
                    table: self.label,
                    name: desc.name,
                });
            }
        }
        Ok(Arc::new(PropertyTable {
            label: self.label,
            own: self.own,
            parent: self.parent,
        }))
    }
}
