//! Integration tests for hook-point dispatch across invocation categories.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures::StreamExt;

use hookline::prelude::*;

#[tokio::test]
async fn test_async_fallback_then_override() {
    let registry = Arc::new(HookRegistry::new());
    let normalize = AsyncHookPoint::new(registry.clone(), "app::hooks::normalize", |s: String| {
        async move { s.trim().to_string() }
    });

    assert_eq!(normalize.call("  token ".to_string()).await, "token");

    register_implementation(
        &registry,
        "app::hooks::normalize",
        HookCallable::suspending(|s: String| async move { s.trim().to_uppercase() }),
    )
    .expect("register override");

    // Identical arguments, override's result.
    assert_eq!(normalize.call("  token ".to_string()).await, "TOKEN");
}

#[tokio::test]
async fn test_conflict_keeps_first_override_dispatching() {
    let registry = Arc::new(HookRegistry::new());
    let scale = HookPoint::new(registry.clone(), "app::hooks::scale", |x: i64| x);

    register_implementation(&registry, "app::hooks::scale", HookCallable::plain(|x: i64| x * 10))
        .expect("first override");
    let err = register_implementation(
        &registry,
        "app::hooks::scale",
        HookCallable::plain(|x: i64| x * 100),
    )
    .expect_err("conflicting override");
    assert!(matches!(err, HookError::Conflict { .. }));

    assert_eq!(scale.call(4), 40);
}

#[test]
fn test_sequence_fallback_then_override() {
    let registry = Arc::new(HookRegistry::new());
    let split = SequenceHookPoint::new(registry.clone(), "app::hooks::split", |text: String| {
        text.split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into_iter()
    });

    let words: Vec<_> = split.call("a b c".to_string()).collect();
    assert_eq!(words, vec!["a", "b", "c"]);

    register_implementation(
        &registry,
        "app::hooks::split",
        HookCallable::sequence(|text: String| {
            text.chars()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .into_iter()
        }),
    )
    .expect("register override");

    let chars: Vec<_> = split.call("ab".to_string()).collect();
    assert_eq!(chars, vec!["a", "b"]);
}

#[tokio::test]
async fn test_stream_consumption_is_lazy() {
    let registry = Arc::new(HookRegistry::new());
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = produced.clone();

    let naturals = StreamHookPoint::new(registry, "app::hooks::naturals", move |start: u64| {
        let counter = counter.clone();
        futures::stream::unfold(start, move |n| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Some((n, n + 1))
            }
        })
    });

    let mut stream = naturals.call(0);
    assert_eq!(stream.next().await, Some(0));
    assert_eq!(stream.next().await, Some(1));
    drop(stream);

    // Consuming two elements must not force production of a third.
    assert_eq!(produced.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_stream_drop_releases_source() {
    struct Source {
        released: Arc<AtomicBool>,
    }

    impl Drop for Source {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    let registry = Arc::new(HookRegistry::new());
    let released = Arc::new(AtomicBool::new(false));
    let flag = released.clone();

    let reader = StreamHookPoint::new(registry, "app::hooks::reader", move |_: ()| {
        let source = Source {
            released: flag.clone(),
        };
        futures::stream::unfold((source, 0u32), |(source, n)| async move {
            Some((n, (source, n + 1)))
        })
    });

    let mut stream = reader.call(());
    assert_eq!(stream.next().await, Some(0));
    assert!(!released.load(Ordering::SeqCst));

    // Early termination by the consumer releases the underlying source.
    drop(stream);
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_stream_override_yields_fresh_stream_per_call() {
    let registry = Arc::new(HookRegistry::new());
    let chunks = StreamHookPoint::new(registry.clone(), "app::hooks::chunks", |data: Vec<u8>| {
        futures::stream::iter(std::iter::once(data))
    });

    register_implementation(
        &registry,
        "app::hooks::chunks",
        HookCallable::suspending_sequence(|data: Vec<u8>| {
            let parts: Vec<Vec<u8>> = data.chunks(2).map(<[u8]>::to_vec).collect();
            futures::stream::iter(parts)
        }),
    )
    .expect("register override");

    let first: Vec<_> = chunks.call(vec![1, 2, 3, 4]).collect().await;
    let second: Vec<_> = chunks.call(vec![1, 2, 3, 4]).collect().await;
    assert_eq!(first, vec![vec![1, 2], vec![3, 4]]);
    assert_eq!(first, second);
}

#[test]
fn test_registry_reads_are_safe_during_dispatch() {
    let registry = Arc::new(HookRegistry::new());
    let point = HookPoint::new(registry.clone(), "app::hooks::probe", {
        let registry = registry.clone();
        move |_: ()| registry.declared_without_impl().len()
    });

    // Diagnostics may be queried from inside a hook invocation.
    assert_eq!(point.call(()), 1);
}
