//! Check button and choice list properties

use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle};

use crate::marshal;
use crate::{BindingsError, PropertyError, PropertyTable, ScriptValue};

pub(crate) fn check_button_table(
    node: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("checkButton")
        .parent(node)
        .property_rw("allowNeutral", get_allow_neutral, set_allow_neutral)
        .property_rw("mark", get_mark, set_mark)
        .property_rw("shape", get_shape, set_shape)
        .property_rw("size", get_size, set_size)
        .build()
}

pub(crate) fn choice_list_table(
    node: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("choiceList")
        .parent(node)
        .property_rw("commitOn", get_commit_on, set_commit_on)
        .property_rw("open", get_open, set_open)
        .property_rw("textEntry", get_text_entry, set_text_entry)
        .build()
}

const MARK: &[&str] = &["default", "check", "circle", "cross", "diamond", "square", "star"];
const SHAPE: &[&str] = &["square", "round"];
const COMMIT_ON: &[&str] = &["select", "exit"];
const OPEN: &[&str] = &["userControl", "onEntry", "always", "multiSelect"];

fn get_allow_neutral(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::flag_attr(doc, node, "allowNeutral", false)
}

fn set_allow_neutral(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_flag_attr(doc, node, "allowNeutral", value)
}

fn get_mark(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "mark", "default")
}

fn set_mark(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "mark", MARK, value)
}

fn get_shape(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "shape", "square")
}

fn set_shape(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "shape", SHAPE, value)
}

fn get_size(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::size_attr(doc, node, "size", "10pt")
}

fn set_size(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_size_attr(doc, node, "size", value)
}

fn get_commit_on(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "commitOn", "select")
}

fn set_commit_on(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "commitOn", COMMIT_ON, value)
}

fn get_open(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "open", "userControl")
}

fn set_open(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "open", OPEN, value)
}

fn get_text_entry(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::flag_attr(doc, node, "textEntry", false)
}

fn set_text_entry(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_flag_attr(doc, node, "textEntry", value)
}
