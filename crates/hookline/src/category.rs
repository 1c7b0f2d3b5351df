//! Invocation categories — the calling-convention class of a callable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The invocation category of a value presented to the hook machinery.
///
/// The first four variants are *dispatchable*: a hook point can forward calls
/// to an implementation of that shape. `Module`, `Instance`, and `Other` only
/// occur during discovery, when a plugin hands over a whole namespace of
/// members and the non-callable ones must be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationCategory {
    /// Calling produces a value directly.
    Plain,
    /// Calling produces a future the caller must await.
    Suspending,
    /// Calling produces a lazy iterator, consumed synchronously.
    SequenceProducing,
    /// Calling produces a lazy stream whose production may await between
    /// elements.
    SuspendingSequenceProducing,
    /// A module-like grouping of members.
    Module,
    /// An instance-like grouping of members.
    Instance,
    /// Anything that is neither callable nor a grouping.
    Other,
}

impl InvocationCategory {
    /// Returns the string name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Suspending => "suspending",
            Self::SequenceProducing => "sequence_producing",
            Self::SuspendingSequenceProducing => "suspending_sequence_producing",
            Self::Module => "module",
            Self::Instance => "instance",
            Self::Other => "other",
        }
    }

    /// Returns whether a hook point can dispatch to callables of this
    /// category.
    pub fn is_dispatchable(&self) -> bool {
        matches!(
            self,
            Self::Plain
                | Self::Suspending
                | Self::SequenceProducing
                | Self::SuspendingSequenceProducing
        )
    }

    /// Returns whether this category is a grouping of members.
    pub fn is_namespace(&self) -> bool {
        matches!(self, Self::Module | Self::Instance)
    }
}

impl fmt::Display for InvocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatchable_categories() {
        assert!(InvocationCategory::Plain.is_dispatchable());
        assert!(InvocationCategory::Suspending.is_dispatchable());
        assert!(InvocationCategory::SequenceProducing.is_dispatchable());
        assert!(InvocationCategory::SuspendingSequenceProducing.is_dispatchable());
        assert!(!InvocationCategory::Module.is_dispatchable());
        assert!(!InvocationCategory::Instance.is_dispatchable());
        assert!(!InvocationCategory::Other.is_dispatchable());
    }

    #[test]
    fn test_namespace_categories() {
        assert!(InvocationCategory::Module.is_namespace());
        assert!(InvocationCategory::Instance.is_namespace());
        assert!(!InvocationCategory::Plain.is_namespace());
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&InvocationCategory::SuspendingSequenceProducing)
            .expect("serialize");
        assert_eq!(json, "\"suspending_sequence_producing\"");
        let parsed: InvocationCategory = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, InvocationCategory::SuspendingSequenceProducing);
    }
}
