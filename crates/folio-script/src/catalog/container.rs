//! Container properties
//!
//! The container intermediate sits between the base node and the grouping
//! kinds. Template and subform chain through it, so a property declared here
//! resolves two hops up from a leaf.

use std::sync::Arc;

use folio_fom::{FomDocument, NodeHandle};

use crate::marshal;
use crate::{BindingsError, PropertyError, PropertyTable, ScriptValue};

pub(crate) fn container_table(
    node: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("container")
        .parent(node)
        .property_rw("relevant", get_relevant, set_relevant)
        .build()
}

pub(crate) fn template_table(
    container: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("template")
        .parent(container)
        .property_rw("baseProfile", get_base_profile, set_base_profile)
        .build()
}

pub(crate) fn subform_table(
    container: &Arc<PropertyTable>,
) -> Result<Arc<PropertyTable>, BindingsError> {
    PropertyTable::builder("subform")
        .parent(container)
        .property_rw("layout", get_layout, set_layout)
        .build()
}

const BASE_PROFILE: &[&str] = &["full", "interactiveForms"];
const LAYOUT: &[&str] = &["position", "tb", "lr-tb", "rl-tb"];

fn get_relevant(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::text_attr(doc, node, "relevant")
}

fn set_relevant(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_text_attr(doc, node, "relevant", value)
}

fn get_base_profile(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "baseProfile", "full")
}

fn set_base_profile(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "baseProfile", BASE_PROFILE, value)
}

fn get_layout(doc: &FomDocument, node: NodeHandle) -> Result<ScriptValue, PropertyError> {
    marshal::keyword_attr(doc, node, "layout", "position")
}

fn set_layout(
    doc: &mut FomDocument,
    node: NodeHandle,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    marshal::set_keyword_attr(doc, node, "layout", LAYOUT, value)
}
