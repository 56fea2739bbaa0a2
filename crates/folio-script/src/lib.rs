//! folio script - Form scripting bridge
//!
//! Exposes the form object model to an embedded QuickJS engine so script
//! code reads and writes node attributes as ordinary object properties.
//!
//! Pieces:
//! - Property tables per node kind, chained by inheritance
//! - Bindings registry (kind -> table), built once at startup
//! - Node mirrors: per-instance wrappers with liveness checks
//! - QuickJS host functions + bootstrap exposing the `form` global

mod bindings;
mod catalog;
mod error;
mod marshal;
mod mirror;
mod quickjs;
mod table;
mod value;

pub use bindings::{Bindings, BindingsBuilder};
pub use error::{BindingsError, PropertyError, ScriptError};
pub use mirror::NodeMirror;
pub use quickjs::ScriptHost;
pub use table::{PropertyDescriptor, PropertyGetter, PropertySetter, PropertyTable, TableBuilder};
pub use value::ScriptValue;

use std::cell::RefCell;
use std::rc::Rc;

use folio_fom::FomDocument;

/// Run a script against a fresh empty document with the standard bindings
pub fn eval(code: &str) -> Result<ScriptValue, ScriptError> {
    let doc = Rc::new(RefCell::new(FomDocument::new()));
    let host = ScriptHost::new(doc, Bindings::standard()?)?;
    host.eval(code)
}
