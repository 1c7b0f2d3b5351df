//! # hookline-sdk
//!
//! SDK for developing hookline plugins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookline_sdk::prelude::*;
//!
//! fn plugin() -> StaticProvider {
//!     StaticProvider::new("rudin-shapiro-xor")
//!         .with_hook(
//!             "textproc::pluginspecs::transform_token",
//!             HookCallable::suspending(|token: Vec<u8>| async move {
//!                 token.into_iter().map(|b| b ^ 0x2a).collect::<Vec<u8>>()
//!             }),
//!         )
//! }
//!
//! let registry = HookRegistry::new();
//! register_provider(&registry, &plugin())?;
//! # Ok::<(), HookError>(())
//! ```

pub mod provider;

/// Prelude for convenient imports.
pub mod prelude {
    pub use hookline::callable::{BoxIterator, HookCallable};
    pub use hookline::category::InvocationCategory;
    pub use hookline::error::{HookError, HookResult};
    pub use hookline::member::{Member, MemberValue, classify};
    pub use hookline::point::{AsyncHookPoint, HookPoint, SequenceHookPoint, StreamHookPoint};
    pub use hookline::registration::{
        HookProvider, register, register_implementation, register_provider,
    };
    pub use hookline::registry::{Hook, HookRegistry};
    pub use hookline::spec_ref::SpecRef;

    pub use hookline::spec_ref;

    pub use crate::provider::StaticProvider;
}
