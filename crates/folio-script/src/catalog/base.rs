//! Base node properties
//!
//! Shared by every wrapper kind through table inheritance. `use`/`usehref`
//! carry the cross-reference linkage to a shared template fragment; they are
//! declared once here rather than redeclared per leaf.

use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle};

use crate::marshal;
use crate::{BindingsError, PropertyError, PropertyTable, ScriptValue};

pub(crate) fn node_table() -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("node")
        .property("className", class_name)
        .property("parent", parent)
        .property_rw("name", get_name, set_name)
        .property_rw("use", get_use, set_use)
        .property_rw("usehref", get_usehref, set_usehref)
        .build()
}

/// Tag name of the node's kind (read-only)
fn class_name(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    let kind = doc.kind_of(node).ok_or(PropertyError::StaleNode)?;
    Ok(ScriptValue::Text(kind.tag_name().to_string()))
}

/// Parent node reference, or null at the root (read-only)
fn parent(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    Ok(match doc.parent_of(node) {
        Some(p) => ScriptValue::Node(p),
        None => ScriptValue::Null,
    })
}

fn get_name(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    Ok(ScriptValue::Text(
        doc.name_of(node).unwrap_or_default().to_string(),
    ))
}

fn set_name(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    let name = marshal::expect_text("name", &value)?;
    doc.set_name(node, &name).map_err(|_| PropertyError::StaleNode)
}

fn get_use(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::text_attr(doc, node, "use")
}

fn set_use(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_text_attr(doc, node, "use", value)
}

fn get_usehref(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::text_attr(doc, node, "usehref")
}

fn set_usehref(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_text_attr(doc, node, "usehref", value)
}
