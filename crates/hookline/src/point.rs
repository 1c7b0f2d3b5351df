//! Hook point wrappers — typed call sites that consult the registry.
//!
//! Each wrapper is built from a default implementation and preserves its
//! invocation category exactly: a plain hook point is called synchronously,
//! a suspending one is awaited, and the sequence-producing ones hand back a
//! fresh lazy iterator or stream per call. At call time the wrapper looks
//! its reference up in the registry and forwards the whole call — same
//! arguments, same category — to the registered implementation if one is
//! bound, otherwise to the default.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use tracing::{debug, warn};

use crate::callable::{
    BoxIterator, HookCallable, PlainFn, SequenceFn, SuspendingFn, SuspendingSequenceFn,
};
use crate::error::{HookError, HookResult};
use crate::registry::HookRegistry;
use crate::spec_ref::SpecRef;

/// Checks a pre-tagged default against the wrapper's dispatch strategy.
///
/// Configuration problems surface here, at declaration time, never during a
/// call.
fn expect_carrier<C: Clone + 'static>(
    spec_ref: &SpecRef,
    default: &HookCallable,
) -> HookResult<C> {
    match default.downcast::<C>() {
        Some(carrier) => Ok(carrier.clone()),
        None => Err(HookError::Configuration {
            spec_ref: spec_ref.clone(),
            category: default.category(),
        }),
    }
}

macro_rules! dispatch_or_default {
    ($self:ident, $carrier:ty) => {{
        match $self.registry.lookup(&$self.spec_ref) {
            Some(hook) => match hook.callable.downcast::<$carrier>() {
                Some(carrier) => {
                    debug!(spec_ref = %$self.spec_ref, "dispatching to plugin implementation");
                    carrier.0.clone()
                }
                None => {
                    warn!(
                        spec_ref = %$self.spec_ref,
                        category = %hook.category,
                        "bound implementation does not match hook point signature, using default"
                    );
                    $self.default.clone()
                }
            },
            None => {
                debug!(spec_ref = %$self.spec_ref, "no implementation bound, using default");
                $self.default.clone()
            }
        }
    }};
}

/// A plain hook point: calling it returns a value directly.
pub struct HookPoint<A, R> {
    registry: Arc<HookRegistry>,
    spec_ref: SpecRef,
    default: Arc<dyn Fn(A) -> R + Send + Sync>,
}

impl<A: 'static, R: 'static> HookPoint<A, R> {
    /// Declares the hook point and wraps its default implementation.
    pub fn new(
        registry: Arc<HookRegistry>,
        spec_ref: impl Into<SpecRef>,
        default: impl Fn(A) -> R + Send + Sync + 'static,
    ) -> Self {
        let spec_ref = spec_ref.into();
        registry.declare_spec(spec_ref.clone());
        Self {
            registry,
            spec_ref,
            default: Arc::new(default),
        }
    }

    /// Declares the hook point from a pre-tagged default.
    ///
    /// Fails with [`HookError::Configuration`] when the default's category
    /// or signature has no plain dispatch strategy.
    pub fn from_callable(
        registry: Arc<HookRegistry>,
        spec_ref: impl Into<SpecRef>,
        default: &HookCallable,
    ) -> HookResult<Self> {
        let spec_ref = spec_ref.into();
        let carrier: PlainFn<A, R> = expect_carrier(&spec_ref, default)?;
        registry.declare_spec(spec_ref.clone());
        Ok(Self {
            registry,
            spec_ref,
            default: carrier.0,
        })
    }

    /// Returns this hook point's reference.
    pub fn spec_ref(&self) -> &SpecRef {
        &self.spec_ref
    }

    /// Calls the bound implementation, or the default when none is bound.
    pub fn call(&self, args: A) -> R {
        let chosen = dispatch_or_default!(self, PlainFn<A, R>);
        chosen(args)
    }
}

impl<A, R> Clone for HookPoint<A, R> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            spec_ref: self.spec_ref.clone(),
            default: self.default.clone(),
        }
    }
}

impl<A, R> std::fmt::Debug for HookPoint<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookPoint")
            .field("spec_ref", &self.spec_ref)
            .finish_non_exhaustive()
    }
}

/// A suspending hook point: calling it yields a future that resolves when
/// the chosen implementation's suspension resolves. No extra buffering is
/// introduced, and dropping the future cancels whichever implementation is
/// running.
pub struct AsyncHookPoint<A, R> {
    registry: Arc<HookRegistry>,
    spec_ref: SpecRef,
    default: Arc<dyn Fn(A) -> BoxFuture<'static, R> + Send + Sync>,
}

impl<A: 'static, R: 'static> AsyncHookPoint<A, R> {
    /// Declares the hook point and wraps its default implementation.
    pub fn new<F, Fut>(
        registry: Arc<HookRegistry>,
        spec_ref: impl Into<SpecRef>,
        default: F,
    ) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let spec_ref = spec_ref.into();
        registry.declare_spec(spec_ref.clone());
        Self {
            registry,
            spec_ref,
            default: Arc::new(move |args: A| -> BoxFuture<'static, R> {
                Box::pin(default(args))
            }),
        }
    }

    /// Declares the hook point from a pre-tagged default.
    pub fn from_callable(
        registry: Arc<HookRegistry>,
        spec_ref: impl Into<SpecRef>,
        default: &HookCallable,
    ) -> HookResult<Self> {
        let spec_ref = spec_ref.into();
        let carrier: SuspendingFn<A, R> = expect_carrier(&spec_ref, default)?;
        registry.declare_spec(spec_ref.clone());
        Ok(Self {
            registry,
            spec_ref,
            default: carrier.0,
        })
    }

    /// Returns this hook point's reference.
    pub fn spec_ref(&self) -> &SpecRef {
        &self.spec_ref
    }

    /// Calls the bound implementation, or the default when none is bound.
    pub async fn call(&self, args: A) -> R {
        let chosen = dispatch_or_default!(self, SuspendingFn<A, R>);
        chosen(args).await
    }
}

impl<A, R> Clone for AsyncHookPoint<A, R> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            spec_ref: self.spec_ref.clone(),
            default: self.default.clone(),
        }
    }
}

/// A sequence-producing hook point: calling it returns a fresh lazy
/// iterator per call, never shared across calls. Elements are pulled from
/// the chosen implementation one at a time; dropping the iterator early
/// releases the underlying source.
pub struct SequenceHookPoint<A, T> {
    registry: Arc<HookRegistry>,
    spec_ref: SpecRef,
    default: Arc<dyn Fn(A) -> BoxIterator<T> + Send + Sync>,
}

impl<A: 'static, T: 'static> SequenceHookPoint<A, T> {
    /// Declares the hook point and wraps its default implementation.
    pub fn new<F, I>(registry: Arc<HookRegistry>, spec_ref: impl Into<SpecRef>, default: F) -> Self
    where
        F: Fn(A) -> I + Send + Sync + 'static,
        I: Iterator<Item = T> + Send + 'static,
    {
        let spec_ref = spec_ref.into();
        registry.declare_spec(spec_ref.clone());
        Self {
            registry,
            spec_ref,
            default: Arc::new(move |args: A| -> BoxIterator<T> { Box::new(default(args)) }),
        }
    }

    /// Declares the hook point from a pre-tagged default.
    pub fn from_callable(
        registry: Arc<HookRegistry>,
        spec_ref: impl Into<SpecRef>,
        default: &HookCallable,
    ) -> HookResult<Self> {
        let spec_ref = spec_ref.into();
        let carrier: SequenceFn<A, T> = expect_carrier(&spec_ref, default)?;
        registry.declare_spec(spec_ref.clone());
        Ok(Self {
            registry,
            spec_ref,
            default: carrier.0,
        })
    }

    /// Returns this hook point's reference.
    pub fn spec_ref(&self) -> &SpecRef {
        &self.spec_ref
    }

    /// Calls the bound implementation, or the default when none is bound.
    pub fn call(&self, args: A) -> BoxIterator<T> {
        let chosen = dispatch_or_default!(self, SequenceFn<A, T>);
        chosen(args)
    }
}

impl<A, T> Clone for SequenceHookPoint<A, T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            spec_ref: self.spec_ref.clone(),
            default: self.default.clone(),
        }
    }
}

/// A suspending-sequence-producing hook point: calling it returns a fresh
/// lazy stream per call. Consumption may suspend between elements;
/// cancellation (dropping the stream) propagates to the producing
/// implementation, releasing whatever source it holds.
pub struct StreamHookPoint<A, T> {
    registry: Arc<HookRegistry>,
    spec_ref: SpecRef,
    default: Arc<dyn Fn(A) -> BoxStream<'static, T> + Send + Sync>,
}

impl<A: 'static, T: 'static> StreamHookPoint<A, T> {
    /// Declares the hook point and wraps its default implementation.
    pub fn new<F, S>(registry: Arc<HookRegistry>, spec_ref: impl Into<SpecRef>, default: F) -> Self
    where
        F: Fn(A) -> S + Send + Sync + 'static,
        S: futures::Stream<Item = T> + Send + 'static,
    {
        let spec_ref = spec_ref.into();
        registry.declare_spec(spec_ref.clone());
        Self {
            registry,
            spec_ref,
            default: Arc::new(move |args: A| -> BoxStream<'static, T> {
                Box::pin(default(args))
            }),
        }
    }

    /// Declares the hook point from a pre-tagged default.
    pub fn from_callable(
        registry: Arc<HookRegistry>,
        spec_ref: impl Into<SpecRef>,
        default: &HookCallable,
    ) -> HookResult<Self> {
        let spec_ref = spec_ref.into();
        let carrier: SuspendingSequenceFn<A, T> = expect_carrier(&spec_ref, default)?;
        registry.declare_spec(spec_ref.clone());
        Ok(Self {
            registry,
            spec_ref,
            default: carrier.0,
        })
    }

    /// Returns this hook point's reference.
    pub fn spec_ref(&self) -> &SpecRef {
        &self.spec_ref
    }

    /// Calls the bound implementation, or the default when none is bound.
    pub fn call(&self, args: A) -> BoxStream<'static, T> {
        let chosen = dispatch_or_default!(self, SuspendingSequenceFn<A, T>);
        chosen(args)
    }
}

impl<A, T> Clone for StreamHookPoint<A, T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            spec_ref: self.spec_ref.clone(),
            default: self.default.clone(),
        }
    }
}
