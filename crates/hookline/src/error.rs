//! Unified error types for the hook machinery.
//!
//! A lookup miss is deliberately *not* an error: a hook point with no bound
//! implementation silently falls back to its default.

use thiserror::Error;

use crate::category::InvocationCategory;
use crate::spec_ref::SpecRef;

/// A specialized `Result` type for hook operations.
pub type HookResult<T> = Result<T, HookError>;

/// Errors raised by registration and hook-point construction.
///
/// All variants are synchronous and leave the registry either fully updated
/// or completely unchanged.
#[derive(Debug, Error)]
pub enum HookError {
    /// A different implementation is already bound to this reference.
    /// The first-registered implementation is retained.
    #[error(
        "another implementation ({existing}) is already registered for {spec_ref}"
    )]
    Conflict {
        /// The contested hook point.
        spec_ref: SpecRef,
        /// Category of the implementation that stays bound.
        existing: InvocationCategory,
    },

    /// A hook point was constructed from a default whose category or call
    /// signature has no dispatch strategy for that hook point. Raised at
    /// declaration time, never during a call.
    #[error("hook point {spec_ref} cannot dispatch a {category} default")]
    Configuration {
        /// The hook point being declared.
        spec_ref: SpecRef,
        /// Category of the rejected default.
        category: InvocationCategory,
    },

    /// `register` was handed something that is neither a grouping namespace
    /// nor a tagged, dispatchable callable.
    #[error(
        "cannot register a {found} value: expected a module, an instance, \
         or a tagged hook implementation"
    )]
    Usage {
        /// Category of the rejected target.
        found: InvocationCategory,
    },
}
