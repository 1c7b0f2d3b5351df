//! Spec references — unique string keys identifying hook points.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one hook point, unique within a process.
///
/// A reference is formed from the declaring unit's qualified name and the
/// hook function's name, joined by `::`. References are purely in-memory
/// keys; they are never persisted or sent across processes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecRef(String);

impl SpecRef {
    /// Creates a reference from an already-formed string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Creates a reference from a declaring unit and a hook name.
    ///
    /// The [`crate::spec_ref!`] macro fills in the unit from
    /// `module_path!()` at the declaration site.
    pub fn from_parts(unit: &str, name: &str) -> Self {
        Self(format!("{unit}::{name}"))
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SpecRef {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for SpecRef {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for SpecRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds a [`SpecRef`] for a hook declared in the current module.
///
/// `spec_ref!(tokenize)` in module `textproc::pluginspecs` yields the
/// reference `textproc::pluginspecs::tokenize`.
#[macro_export]
macro_rules! spec_ref {
    ($name:ident) => {
        $crate::SpecRef::from_parts(module_path!(), stringify!($name))
    };
    ($name:expr) => {
        $crate::SpecRef::from_parts(module_path!(), $name)
    };
}
