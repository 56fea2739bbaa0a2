//! Property catalogs
//!
//! The per-kind property declarations, one module per type family. Each kind
//! contributes a short static list; the shared machinery lives in the table
//! and marshal modules. Assembled here in dependency order so every table can
//! link to its already-built supertype.

mod base;
mod buttons;
mod container;
mod edits;
mod field;

use folio_fom::NodeKind;

use crate::{Bindings, BindingsError};

/// Scroll display modes shared by the edit widgets
pub(crate) const SCROLL_POLICY: &[&str] = &["auto", "off", "on"];

pub(crate) fn standard() -> Result<Bindings, BindingsError> {
    let node = base::node_table()?;
    let container = container::container_table(&node)?;
    let template = container::template_table(&container)?;
    let subform = container::subform_table(&container)?;
    let field = field::field_table(&node)?;
    let text_edit = edits::text_edit_table(&node)?;
    let numeric_edit = edits::numeric_edit_table(&node)?;
    let date_time_edit = edits::date_time_edit_table(&node)?;
    let check_button = buttons::check_button_table(&node)?;
    let choice_list = buttons::choice_list_table(&node)?;

    Ok(Bindings::builder()
        .table(NodeKind::Template, template)?
        .table(NodeKind::Subform, subform)?
        .table(NodeKind::Field, field)?
        .table(NodeKind::TextEdit, text_edit)?
        .table(NodeKind::NumericEdit, numeric_edit)?
        .table(NodeKind::DateTimeEdit, date_time_edit)?
        .table(NodeKind::CheckButton, check_button)?
        .table(NodeKind::ChoiceList, choice_list)?
        .build())
}
