//! Capability negotiation benchmarks.
//!
//! Run with: cargo bench --bench negotiate
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use firefox_remote_session::capabilities::negotiate;
use firefox_remote_session::{BrowserInfo, Capabilities, NewSessionParams, SessionManager};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const DESIRED_SIZES: &[usize] = &[0, 8, 64];

fn browser() -> BrowserInfo {
    BrowserInfo::new("Firefox", "48.0a1").with_platform("Linux", "4.4.0")
}

fn desired(size: usize) -> Capabilities {
    (0..size).map(|i| (format!("vendor:key{i}"), i as i64)).collect()
}

// ============================================================================
// Benchmark: Negotiate
// ============================================================================

fn bench_negotiate(c: &mut Criterion) {
    let defaults = browser().default_capabilities();
    let required = Capabilities::new().with("browserName", "Firefox");

    let mut group = c.benchmark_group("negotiate");

    for &size in DESIRED_SIZES {
        let desired = desired(size);
        group.bench_with_input(BenchmarkId::new("desired", size), &desired, |b, desired| {
            b.iter(|| negotiate(black_box(&defaults), Some(desired), Some(&required)));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Session Lifecycle
// ============================================================================

fn bench_session_lifecycle(c: &mut Criterion) {
    let manager = SessionManager::from_info(&browser()).expect("valid info");

    c.bench_function("session_new_delete", |b| {
        b.iter(|| {
            let session = manager
                .new_session(NewSessionParams::new())
                .expect("session");
            manager
                .delete_session(session.id().as_str())
                .expect("delete");
        });
    });
}

criterion_group!(benches, bench_negotiate, bench_session_lifecycle);
criterion_main!(benches);
