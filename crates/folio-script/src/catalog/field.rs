//! Field properties

use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle};

use crate::marshal;
use crate::{BindingsError, PropertyError, PropertyTable, ScriptValue};

pub(crate) fn field_table(node: &Arc<PropertyTable>) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("field")
        .parent(node)
        .property_rw("access", get_access, set_access)
        .property_rw("hAlign", get_h_align, set_h_align)
        .property_rw("colSpan", get_col_span, set_col_span)
        .build()
}

const ACCESS: &[&str] = &["open", "readOnly", "protected", "nonInteractive"];
const H_ALIGN: &[&str] = &["left", "center", "right", "justify", "justifyAll"];

fn get_access(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "access", "open")
}

fn set_access(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "access", ACCESS, value)
}

fn get_h_align(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "hAlign", "left")
}

fn set_h_align(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "hAlign", H_ALIGN, value)
}

fn get_col_span(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::number_attr(doc, node, "colSpan", 1.0)
}

fn set_col_span(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_number_attr(doc, node, "colSpan", value)
}
