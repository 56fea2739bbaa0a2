//! Value marshaling
//!
//! Conversions between script values and typed attribute state. Setters
//! validate before they store, so a rejected write never leaves a partial
//! mutation behind. Documented coercions: numbers and booleans stringify
//! into text attributes, numeric strings parse into number attributes,
//! "0"/"1" parse into flags, bare numbers are taken as points.

use folio_fom::{AttrValue, FomDocument, Measure, NodeHandle};

use crate::{PropertyError, ScriptValue};

/// Convert stored attribute state to the script-visible value
pub(crate) fn from_attr(doc: &FomDocument, value: &AttrValue) -> ScriptValue {
    match value {
        AttrValue::Text(s) => ScriptValue::Text(s.clone()),
        AttrValue::Number(n) => ScriptValue::Number(*n),
        AttrValue::Flag(b) => ScriptValue::Bool(*b),
        AttrValue::Keyword(k) => ScriptValue::Text(doc.tree().resolve(*k).to_string()),
        AttrValue::Size(m) => ScriptValue::Text(m.to_string()),
    }
}

fn type_mismatch(name: &str, expected: impl Into<String>, got: &ScriptValue) -> PropertyError {
    PropertyError::TypeMismatch {
        name: name.to_string(),
        expected: expected.into(),
        got: describe(got),
    }
}

fn describe(value: &ScriptValue) -> String {
    match value {
        ScriptValue::Text(s) => format!("string {:?}", s),
        ScriptValue::Number(n) => format!("number {}", n),
        other => other.type_name().to_string(),
    }
}

/// Coerce a script value to text (strings pass through; numbers and
/// booleans take their canonical display form)
pub(crate) fn expect_text(name: &str, value: &ScriptValue) -> Result<String, PropertyError> {
    match value {
        ScriptValue::Text(s) => Ok(s.clone()),
        ScriptValue::Number(n) => Ok(n.to_string()),
        ScriptValue::Bool(b) => Ok(b.to_string()),
        other => Err(type_mismatch(name, "string", other)),
    }
}

// --- text attributes ---

pub(crate) fn text_attr(
    doc: &FomDocument,
    node: NodeHandle,
    name: &'static str,
) -> Result<ScriptValue, PropertyError> {
    Ok(match doc.attr(node, name) {
        Some(v) => from_attr(doc, v),
        None => ScriptValue::Text(String::new()),
    })
}

pub(crate) fn set_text_attr(
    doc: &mut FomDocument,
    node: NodeHandle,
    name: &'static str,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    let text = expect_text(name, &value)?;
    doc.set_attr(node, name, AttrValue::Text(text))
        .map_err(|_| PropertyError::StaleNode)
}

// --- number attributes ---

pub(crate) fn number_attr(
    doc: &FomDocument,
    node: NodeHandle,
    name: &'static str,
    default: f64,
) -> Result<ScriptValue, PropertyError> {
    Ok(match doc.attr(node, name) {
        Some(v) => from_attr(doc, v),
        None => ScriptValue::Number(default),
    })
}

pub(crate) fn set_number_attr(
    doc: &mut FomDocument,
    node: NodeHandle,
    name: &'static str,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    let number = match &value {
        ScriptValue::Number(n) => *n,
        ScriptValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| type_mismatch(name, "number", &value))?,
        other => return Err(type_mismatch(name, "number", other)),
    };
    doc.set_attr(node, name, AttrValue::Number(number))
        .map_err(|_| PropertyError::StaleNode)
}

// --- flag attributes ---

pub(crate) fn flag_attr(
    doc: &FomDocument,
    node: NodeHandle,
    name: &'static str,
    default: bool,
) -> Result<ScriptValue, PropertyError> {
    Ok(match doc.attr(node, name) {
        Some(v) => from_attr(doc, v),
        None => ScriptValue::Bool(default),
    })
}

pub(crate) fn set_flag_attr(
    doc: &mut FomDocument,
    node: NodeHandle,
    name: &'static str,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    let flag = match &value {
        ScriptValue::Bool(b) => *b,
        ScriptValue::Text(s) if s == "0" => false,
        ScriptValue::Text(s) if s == "1" => true,
        other => return Err(type_mismatch(name, "boolean", other)),
    };
    doc.set_attr(node, name, AttrValue::Flag(flag))
        .map_err(|_| PropertyError::StaleNode)
}

// --- keyword attributes ---

pub(crate) fn keyword_attr(
    doc: &FomDocument,
    node: NodeHandle,
    name: &'static str,
    default: &'static str,
) -> Result<ScriptValue, PropertyError> {
    Ok(match doc.attr(node, name) {
        Some(v) => from_attr(doc, v),
        None => ScriptValue::Text(default.to_string()),
    })
}

pub(crate) fn set_keyword_attr(
    doc: &mut FomDocument,
    node: NodeHandle,
    name: &'static str,
    vocab: &'static [&'static str],
    value: ScriptValue,
) -> Result<(), PropertyError> {
    let text = match &value {
        ScriptValue::Text(s) => s.as_str(),
        other => return Err(type_mismatch(name, keyword_expected(vocab), other)),
    };
    if !vocab.contains(&text) {
        return Err(type_mismatch(name, keyword_expected(vocab), &value));
    }
    let keyword = doc.tree_mut().intern(text);
    doc.set_attr(node, name, AttrValue::Keyword(keyword))
        .map_err(|_| PropertyError::StaleNode)
}

fn keyword_expected(vocab: &[&str]) -> String {
    format!("one of {}", vocab.join("|"))
}

// --- measurement attributes ---

pub(crate) fn size_attr(
    doc: &FomDocument,
    node: NodeHandle,
    name: &'static str,
    default: &'static str,
) -> Result<ScriptValue, PropertyError> {
    Ok(match doc.attr(node, name) {
        Some(v) => from_attr(doc, v),
        None => ScriptValue::Text(default.to_string()),
    })
}

pub(crate) fn set_size_attr(
    doc: &mut FomDocument,
    node: NodeHandle,
    name: &'static str,
    value: ScriptValue,
) -> Result<(), PropertyError> {
    let measure = match &value {
        ScriptValue::Text(s) => s
            .parse::<Measure>()
            .map_err(|_| type_mismatch(name, "measurement", &value))?,
        ScriptValue::Number(n) => Measure::pt(*n),
        other => return Err(type_mismatch(name, "measurement", other)),
    };
    doc.set_attr(node, name, AttrValue::Size(measure))
        .map_err(|_| PropertyError::StaleNode)
}
