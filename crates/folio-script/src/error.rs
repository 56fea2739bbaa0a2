//! Bridge error taxonomy
//!
//! Property-access failures are script-visible and recoverable; bindings
//! construction failures are startup-time and fatal to the host.

/// Runtime property-access errors, surfaced to script as catchable values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {name}")]
    UnknownProperty { name: String },

    #[error("property {name} is read-only")]
    ReadOnlyProperty { name: String },

    #[error("property {name} expects {expected}, got {got}")]
    TypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    #[error("node is gone; the wrapper outlived it")]
    StaleNode,
}

impl PropertyError {
    /// Stable kind tag carried across the script boundary
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyError::UnknownProperty { .. } => "unknownProperty",
            PropertyError::ReadOnlyProperty { .. } => "readOnlyProperty",
            PropertyError::TypeMismatch { .. } => "typeMismatch",
            PropertyError::StaleNode => "staleNode",
        }
    }
}

/// Startup-time bindings construction errors. Hosts must treat these as
/// fatal: the property surface is static configuration, so an inconsistency
/// here is a build defect, not runtime data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingsError {
    #[error("duplicate property {name:?} in table {table:?}")]
    DuplicateProperty {
        table: &'static str,
        name: &'static str,
    },

    #[error("kind {kind:?} already has a table registered")]
    DuplicateKind { kind: &'static str },
}

/// Script engine failures (distinct from property errors: these describe the
/// engine itself, or an exception a script let escape to the host)
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script engine error: {0}")]
    Engine(String),

    #[error("script exception: {0}")]
    Exception(String),

    #[error(transparent)]
    Bindings(#[from] BindingsError),
}
