//! Script values
//!
//! The value shapes a script engine can hand the bridge or receive from it.
//! Serde-tagged so values survive the JSON host-call boundary unchanged.

use folio_fom::NodeHandle;
use serde::{Deserialize, Serialize};

/// A script-visible value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Reference to another form node (exposed to script as a node object)
    Node(#[serde(with = "handle_repr")] NodeHandle),
}

impl ScriptValue {
    /// Script-side type name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Undefined => "undefined",
            ScriptValue::Null => "null",
            ScriptValue::Bool(_) => "boolean",
            ScriptValue::Number(_) => "number",
            ScriptValue::Text(_) => "string",
            ScriptValue::Node(_) => "node",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScriptValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScriptValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScriptValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeHandle> {
        match self {
            ScriptValue::Node(h) => Some(*h),
            _ => None,
        }
    }
}

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        ScriptValue::Bool(b)
    }
}

impl From<f64> for ScriptValue {
    fn from(n: f64) -> Self {
        ScriptValue::Number(n)
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::Text(s.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::Text(s)
    }
}

mod handle_repr {
    use folio_fom::NodeHandle;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Repr {
        id: u32,
        #[serde(rename = "gen")]
        generation: u32,
    }

    pub fn serialize<S: Serializer>(h: &NodeHandle, serializer: S) -> Result<S::Ok, S::Error> {
        Repr {
            id: h.id().value(),
            generation: h.generation().value(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NodeHandle, D::Error> {
        let repr = Repr::deserialize(deserializer)?;
        Ok(NodeHandle::from_raw(repr.id, repr.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let values = [
            ScriptValue::Undefined,
            ScriptValue::Null,
            ScriptValue::Bool(true),
            ScriptValue::Number(42.5),
            ScriptValue::Text("auto".into()),
            ScriptValue::Node(NodeHandle::from_raw(3, 1)),
        ];
        for v in values {
            let json = serde_json::to_string(&v).unwrap();
            let back: ScriptValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, v);
        }
    }

    #[test]
    fn test_tagged_shape() {
        assert_eq!(
            serde_json::to_string(&ScriptValue::Undefined).unwrap(),
            "\"undefined\""
        );
        assert_eq!(
            serde_json::to_string(&ScriptValue::Number(1.0)).unwrap(),
            "{\"number\":1.0}"
        );
        assert_eq!(
            serde_json::to_string(&ScriptValue::Node(NodeHandle::from_raw(2, 0))).unwrap(),
            "{\"node\":{\"id\":2,\"gen\":0}}"
        );
    }
}
