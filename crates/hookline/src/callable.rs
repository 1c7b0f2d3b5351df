//! Type-erased hook callables.
//!
//! A reflective runtime can inspect a callable's definition to learn its
//! invocation category; here the plugin author states the category by
//! choosing one of the four constructors. The call signature is erased
//! behind `dyn Any` so callables with different argument and result types
//! can share one registry; hook points downcast back to the exact shape
//! when dispatching.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use futures::Stream;
use futures::future::BoxFuture;
use futures::stream::BoxStream;

use crate::category::InvocationCategory;

/// A boxed, sendable iterator — the sequence-producing counterpart of
/// [`BoxStream`].
pub type BoxIterator<T> = Box<dyn Iterator<Item = T> + Send>;

/// Carrier for a plain callable: `A -> R`.
pub struct PlainFn<A, R>(pub Arc<dyn Fn(A) -> R + Send + Sync>);

/// Carrier for a suspending callable: `A -> future of R`.
pub struct SuspendingFn<A, R>(pub Arc<dyn Fn(A) -> BoxFuture<'static, R> + Send + Sync>);

/// Carrier for a sequence-producing callable: `A -> iterator of T`.
pub struct SequenceFn<A, T>(pub Arc<dyn Fn(A) -> BoxIterator<T> + Send + Sync>);

/// Carrier for a suspending-sequence-producing callable: `A -> stream of T`.
pub struct SuspendingSequenceFn<A, T>(pub Arc<dyn Fn(A) -> BoxStream<'static, T> + Send + Sync>);

impl<A, R> Clone for PlainFn<A, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A, R> Clone for SuspendingFn<A, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A, T> Clone for SequenceFn<A, T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A, T> Clone for SuspendingSequenceFn<A, T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// A hook implementation with an explicit invocation category.
///
/// Clones share the same underlying allocation and therefore count as the
/// *same* implementation for conflict detection; two callables built from
/// separate constructor calls are always distinct, even when they wrap
/// identical code.
#[derive(Clone)]
pub struct HookCallable {
    category: InvocationCategory,
    payload: Arc<dyn Any + Send + Sync>,
}

impl HookCallable {
    /// Wraps a callable that returns its value directly.
    pub fn plain<A, R, F>(f: F) -> Self
    where
        A: 'static,
        R: 'static,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            category: InvocationCategory::Plain,
            payload: Arc::new(PlainFn::<A, R>(Arc::new(f))),
        }
    }

    /// Wraps a callable that returns a future.
    pub fn suspending<A, R, F, Fut>(f: F) -> Self
    where
        A: 'static,
        R: 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let erased: Arc<dyn Fn(A) -> BoxFuture<'static, R> + Send + Sync> =
            Arc::new(move |args: A| -> BoxFuture<'static, R> { Box::pin(f(args)) });
        Self {
            category: InvocationCategory::Suspending,
            payload: Arc::new(SuspendingFn(erased)),
        }
    }

    /// Wraps a callable that returns a lazy iterator.
    pub fn sequence<A, T, F, I>(f: F) -> Self
    where
        A: 'static,
        T: 'static,
        F: Fn(A) -> I + Send + Sync + 'static,
        I: Iterator<Item = T> + Send + 'static,
    {
        let erased: Arc<dyn Fn(A) -> BoxIterator<T> + Send + Sync> =
            Arc::new(move |args: A| -> BoxIterator<T> { Box::new(f(args)) });
        Self {
            category: InvocationCategory::SequenceProducing,
            payload: Arc::new(SequenceFn(erased)),
        }
    }

    /// Wraps a callable that returns a lazy stream.
    pub fn suspending_sequence<A, T, F, S>(f: F) -> Self
    where
        A: 'static,
        T: 'static,
        F: Fn(A) -> S + Send + Sync + 'static,
        S: Stream<Item = T> + Send + 'static,
    {
        let erased: Arc<dyn Fn(A) -> BoxStream<'static, T> + Send + Sync> =
            Arc::new(move |args: A| -> BoxStream<'static, T> { Box::pin(f(args)) });
        Self {
            category: InvocationCategory::SuspendingSequenceProducing,
            payload: Arc::new(SuspendingSequenceFn(erased)),
        }
    }

    /// Returns the invocation category stated at construction.
    pub fn category(&self) -> InvocationCategory {
        self.category
    }

    /// Returns whether two callables are the same implementation, i.e.
    /// clones of one constructed value.
    pub fn same_implementation(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }

    /// Downcasts the erased payload back to a concrete carrier.
    pub(crate) fn downcast<C: 'static>(&self) -> Option<&C> {
        self.payload.downcast_ref::<C>()
    }
}

impl fmt::Debug for HookCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookCallable")
            .field("category", &self.category)
            .field("payload", &"<callable>")
            .finish()
    }
}
