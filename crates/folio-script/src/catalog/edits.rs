//! Edit widget properties
//!
//! Text, numeric and date/time entry widgets. Each declares its own scroll
//! policy the way the serialized form grammar does; `use`/`usehref` arrive
//! through the base table.

use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle};

use super::SCROLL_POLICY;
use crate::marshal;
use crate::{BindingsError, PropertyError, PropertyTable, ScriptValue};

pub(crate) fn text_edit_table(
    node: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("textEdit")
        .parent(node)
        .property_rw("allowRichText", get_allow_rich_text, set_allow_rich_text)
        .property_rw("hScrollPolicy", get_h_scroll_policy, set_h_scroll_policy)
        .property_rw("multiLine", get_multi_line, set_multi_line)
        .property_rw("vScrollPolicy", get_v_scroll_policy, set_v_scroll_policy)
        .build()
}

pub(crate) fn numeric_edit_table(
    node: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("numericEdit")
        .parent(node)
        .property_rw("hScrollPolicy", get_h_scroll_policy, set_h_scroll_policy)
        .build()
}

/// Date/time entry widget: horizontal scroll mode plus the inherited
/// cross-reference pair
pub(crate) fn date_time_edit_table(
    node: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("dateTimeEdit")
        .parent(node)
        .property_rw("hScrollPolicy", get_h_scroll_policy, set_h_scroll_policy)
        .build()
}

fn get_h_scroll_policy(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "hScrollPolicy", "auto")
}

fn set_h_scroll_policy(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "hScrollPolicy", SCROLL_POLICY, value)
}

fn get_v_scroll_policy(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "vScrollPolicy", "auto")
}

fn set_v_scroll_policy(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "vScrollPolicy", SCROLL_POLICY, value)
}

fn get_allow_rich_text(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::flag_attr(doc, node, "allowRichText", false)
}

fn set_allow_rich_text(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_flag_attr(doc, node, "allowRichText", value)
}

fn get_multi_line(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::flag_attr(doc, node, "multiLine", false)
}

fn set_multi_line(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_flag_attr(doc, node, "multiLine", value)
}
