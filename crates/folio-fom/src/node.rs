//! FOM Node - Compact representation
//!
//! Sibling-linked layout: a node stores NodeId links (4 bytes each) instead
//! of pointers, so the whole tree lives in one arena allocation.

use crate::{InternedString, Measure, NodeId};

/// Closed set of node-type tags a form template can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Template root
    Template,
    /// Grouping container
    Subform,
    /// Interactive form field
    Field,
    /// Plain/rich text entry widget
    TextEdit,
    /// Numeric entry widget
    NumericEdit,
    /// Date/time entry widget
    DateTimeEdit,
    /// Check box / radio button widget
    CheckButton,
    /// Drop-down / list widget
    ChoiceList,
}

impl NodeKind {
    /// All kinds, in registration order
    pub const ALL: &'static [NodeKind] = &[
        NodeKind::Template,
        NodeKind::Subform,
        NodeKind::Field,
        NodeKind::TextEdit,
        NodeKind::NumericEdit,
        NodeKind::DateTimeEdit,
        NodeKind::CheckButton,
        NodeKind::ChoiceList,
    ];

    /// The element tag this kind uses in serialized templates
    pub fn tag_name(self) -> &'static str {
        match self {
            NodeKind::Template => "template",
            NodeKind::Subform => "subform",
            NodeKind::Field => "field",
            NodeKind::TextEdit => "textEdit",
            NodeKind::NumericEdit => "numericEdit",
            NodeKind::DateTimeEdit => "dateTimeEdit",
            NodeKind::CheckButton => "checkButton",
            NodeKind::ChoiceList => "choiceList",
        }
    }

    /// Parse a serialized tag back into a kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag_name() == tag)
    }
}

/// Typed attribute storage
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Free-form text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean flag
    Flag(bool),
    /// Enumerated keyword (interned; vocabulary is per-attribute)
    Keyword(InternedString),
    /// Measurement ("10pt", "0.25in")
    Size(Measure),
}

/// FOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-type tag
    pub kind: NodeKind,
    /// Template-declared name, if any
    pub name: Option<InternedString>,
    /// Attributes (small lists; linear scan beats hashing here)
    attrs: Vec<(InternedString, AttrValue)>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, name: Option<InternedString>) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            kind,
            name,
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: InternedString) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Set an attribute, replacing any existing value of the same name
    pub fn set_attr(&mut self, name: InternedString, value: AttrValue) {
        for (n, v) in self.attrs.iter_mut() {
            if *n == name {
                *v = value;
                return;
            }
        }
        self.attrs.push((name, value));
    }

    /// Remove an attribute, returning the previous value if it was set
    pub fn remove_attr(&mut self, name: InternedString) -> Option<AttrValue> {
        let idx = self.attrs.iter().position(|(n, _)| *n == name)?;
        Some(self.attrs.remove(idx).1)
    }

    /// Iterate over set attributes
    pub fn attrs(&self) -> impl Iterator<Item = (InternedString, &AttrValue)> {
        self.attrs.iter().map(|(n, v)| (*n, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_tag(kind.tag_name()), Some(*kind));
        }
        assert_eq!(NodeKind::from_tag("blink"), None);
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut node = Node::new(NodeKind::Field, None);
        let key = InternedString::EMPTY;
        node.set_attr(key, AttrValue::Number(1.0));
        node.set_attr(key, AttrValue::Number(2.0));
        assert_eq!(node.attr(key), Some(&AttrValue::Number(2.0)));
        assert_eq!(node.attrs().count(), 1);
    }

    #[test]
    fn test_remove_attr() {
        let mut node = Node::new(NodeKind::Field, None);
        let key = InternedString::EMPTY;
        assert!(node.remove_attr(key).is_none());
        node.set_attr(key, AttrValue::Flag(true));
        assert_eq!(node.remove_attr(key), Some(AttrValue::Flag(true)));
        assert!(node.attr(key).is_none());
    }
}
