//! # hookline
//!
//! Async-aware hook points with pluggable implementations. Application code
//! declares hook points with a default behavior; a plugin may bind an
//! override per hook point, and every call is dispatched to the override or
//! the default with the invocation category preserved exactly — plain calls
//! stay synchronous, suspending calls stay suspending, sequence-producing
//! calls stay lazy.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hookline::{AsyncHookPoint, HookCallable, HookRegistry, register_implementation};
//!
//! let registry = Arc::new(HookRegistry::new());
//!
//! // The host declares a hook point with a default.
//! let transform = AsyncHookPoint::new(registry.clone(), hookline::spec_ref!(transform), |t: Vec<u8>| async move { t });
//!
//! // A plugin overrides it.
//! register_implementation(
//!     &registry,
//!     transform.spec_ref().clone(),
//!     HookCallable::suspending(|t: Vec<u8>| async move {
//!         t.into_iter().rev().collect()
//!     }),
//! )?;
//! # Ok::<(), hookline::HookError>(())
//! ```

pub mod callable;
pub mod category;
pub mod error;
pub mod member;
pub mod point;
pub mod registration;
pub mod registry;
pub mod spec_ref;

pub use callable::{BoxIterator, HookCallable};
pub use category::InvocationCategory;
pub use error::{HookError, HookResult};
pub use member::{Member, MemberValue, classify};
pub use point::{AsyncHookPoint, HookPoint, SequenceHookPoint, StreamHookPoint};
pub use registration::{HookProvider, register, register_implementation, register_provider};
pub use registry::{Hook, HookRegistry};
pub use spec_ref::SpecRef;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::callable::{BoxIterator, HookCallable};
    pub use crate::category::InvocationCategory;
    pub use crate::error::{HookError, HookResult};
    pub use crate::member::{Member, MemberValue, classify};
    pub use crate::point::{AsyncHookPoint, HookPoint, SequenceHookPoint, StreamHookPoint};
    pub use crate::registration::{
        HookProvider, register, register_implementation, register_provider,
    };
    pub use crate::registry::{Hook, HookRegistry};
    pub use crate::spec_ref::SpecRef;

    pub use crate::spec_ref;
}
