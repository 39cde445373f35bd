//! Benchmarks for live-store
//!
//! Run with: cargo bench

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use live_store::{Binding, ListenerSet, SingletonStore};

// =============================================================================
// STORE BENCHMARKS
// =============================================================================

fn bench_store_snapshot(c: &mut Criterion) {
    let store = SingletonStore::new(42u64);
    c.bench_function("store_snapshot", |b| b.iter(|| black_box(store.snapshot())));
}

fn bench_store_ingest_no_listeners(c: &mut Criterion) {
    let store = SingletonStore::new(0u64);
    c.bench_function("store_ingest_no_listeners", |b| {
        b.iter(|| store.ingest(black_box(7)))
    });
}

fn bench_store_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_fanout");
    for listeners in [1usize, 8, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(listeners),
            &listeners,
            |b, &n| {
                let store = SingletonStore::new(0u64);
                let sink = Arc::new(AtomicU64::new(0));
                let subs: Vec<_> = (0..n)
                    .map(|_| {
                        let sink = sink.clone();
                        store.subscribe(Arc::new(move || {
                            sink.fetch_add(1, Ordering::Relaxed);
                        }))
                    })
                    .collect();

                b.iter(|| store.ingest(black_box(3)));
                drop(subs);
            },
        );
    }
    group.finish();
}

// =============================================================================
// BINDING BENCHMARKS
// =============================================================================

fn bench_binding_get(c: &mut Criterion) {
    let store = SingletonStore::new(42u64);
    let binding = Binding::new(store);
    c.bench_function("binding_get", |b| b.iter(|| black_box(binding.get())));
}

fn bench_binding_render_stable_source(c: &mut Criterion) {
    let store = SingletonStore::new(42u64);
    let binding = Binding::new(store);
    c.bench_function("binding_render_stable_source", |b| {
        b.iter(|| binding.render(|v| black_box(v * 2)))
    });
}

fn bench_binding_notify_suppressed(c: &mut Criterion) {
    // Repeated identical payloads: the recheck path without the downstream
    // re-render.
    let store = SingletonStore::new(42u64);
    let binding = Binding::new(store.clone());
    binding.get();
    let _guard = binding.connect(|| {});
    c.bench_function("binding_notify_suppressed", |b| {
        b.iter(|| store.ingest(black_box(42)))
    });
}

// =============================================================================
// LISTENER SET BENCHMARKS
// =============================================================================

fn bench_listener_subscribe_unsubscribe(c: &mut Criterion) {
    let set = ListenerSet::new();
    c.bench_function("listener_subscribe_unsubscribe", |b| {
        b.iter(|| {
            let unsub = set.insert(Arc::new(|| {}));
            unsub.call();
        })
    });
}

criterion_group!(
    benches,
    bench_store_snapshot,
    bench_store_ingest_no_listeners,
    bench_store_fanout,
    bench_binding_get,
    bench_binding_render_stable_source,
    bench_binding_notify_suppressed,
    bench_listener_subscribe_unsubscribe,
);
criterion_main!(benches);
