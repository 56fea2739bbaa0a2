//! String Interner - Deduplicate form vocabulary strings
//!
//! Kind tags, attribute names and keyword values recur across every template,
//! so they are stored once and referenced by a 4-byte id.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub(crate) u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner with the form-description vocabulary pre-interned
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create a new interner with common form strings pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(64),
            map: HashMap::with_capacity(64),
        };

        // Pre-intern empty string at index 0
        interner.intern("");

        // Kind tags
        const KIND_TAGS: &[&str] = &[
            "template", "subform", "field", "textEdit", "numericEdit",
            "dateTimeEdit", "checkButton", "choiceList",
        ];

        // Attribute names
        const ATTR_NAMES: &[&str] = &[
            "name", "use", "usehref", "relevant", "baseProfile", "layout",
            "access", "hAlign", "allowRichText", "hScrollPolicy", "multiLine",
            "vScrollPolicy", "allowNeutral", "mark", "shape", "size",
            "commitOn", "open", "textEntry",
        ];

        // Keyword values
        const KEYWORDS: &[&str] = &[
            "auto", "off", "on", "full", "interactiveForms", "position", "tb",
            "lr-tb", "rl-tb", "left", "center", "right", "justify",
            "justifyAll", "readOnly", "protected", "nonInteractive", "default",
            "check", "circle", "cross", "diamond", "square", "star", "round",
            "select", "exit", "userControl", "onEntry", "always", "multiSelect",
        ];

        for tag in KIND_TAGS {
            interner.intern(tag);
        }
        for attr in ATTR_NAMES {
            interner.intern(attr);
        }
        for kw in KEYWORDS {
            interner.intern(kw);
        }

        interner
    }

    /// Intern a string, returning its ID
    /// If the string is already interned, returns the existing ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }
        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Resolve an interned ID back to its string
    pub fn resolve(&self, s: InternedString) -> &str {
        self.strings
            .get(s.0 as usize)
            .map(|b| &**b)
            .unwrap_or("")
    }

    /// Number of distinct strings interned
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the interner holds no strings
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let mut interner = StringInterner::new();
        let a = interner.intern("checksum");
        let b = interner.intern("checksum");
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a), "checksum");
    }

    #[test]
    fn test_pre_interned_vocabulary() {
        let interner = StringInterner::new();
        assert!(interner.lookup("dateTimeEdit").is_some());
        assert!(interner.lookup("hScrollPolicy").is_some());
        assert!(interner.lookup("usehref").is_some());
        assert!(interner.lookup("not-in-vocabulary").is_none());
    }

    #[test]
    fn test_empty_is_index_zero() {
        let mut interner = StringInterner::new();
        assert_eq!(interner.intern(""), InternedString::EMPTY);
        assert_eq!(interner.resolve(InternedString::EMPTY), "");
    }
}
