//! Benchmarks for the dialog lifecycle and layout pass.
//!
//! Run with: cargo bench -p dialog-foundation

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use dialog_foundation::testing::{RecordingAdapter, TestTarget};
use dialog_foundation::{
    ClickEvent, DialogConfig, DialogFoundation, KeyboardEvent, ManualScheduler, NoopAdapter,
};
use std::hint::black_box;

// ============================================================================
// Lifecycle
// ============================================================================

fn bench_open_close_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialog/lifecycle");

    group.bench_function("noop_adapter", |b| {
        let mut dialog = DialogFoundation::new(NoopAdapter::<()>::new(), ManualScheduler::new());
        b.iter(|| {
            dialog.open();
            dialog.advance_ms(150);
            dialog.close(black_box("ok"));
            dialog.advance_ms(75);
            black_box(dialog.phase());
        })
    });

    group.bench_function("recording_adapter", |b| {
        b.iter(|| {
            let mut dialog =
                DialogFoundation::new(RecordingAdapter::new(), ManualScheduler::new());
            dialog.open();
            dialog.advance_ms(150);
            dialog.close("ok");
            dialog.advance_ms(75);
            black_box(dialog.adapter().calls().len());
        })
    });

    group.bench_function("interrupted", |b| {
        let mut dialog = DialogFoundation::new(NoopAdapter::<()>::new(), ManualScheduler::new());
        b.iter(|| {
            dialog.open();
            dialog.advance_ms(10);
            dialog.close("");
            dialog.advance_ms(10);
            dialog.open();
            dialog.destroy();
            black_box(dialog.is_open());
        })
    });

    group.finish();
}

// ============================================================================
// Layout
// ============================================================================

fn bench_layout_batching(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialog/layout");

    for requests in [1usize, 8, 64] {
        group.bench_with_input(
            BenchmarkId::new("requests_per_frame", requests),
            &requests,
            |b, &requests| {
                let mut dialog = DialogFoundation::new(
                    RecordingAdapter::new().with_content_scrollable(true),
                    ManualScheduler::new(),
                );
                b.iter(|| {
                    for _ in 0..requests {
                        dialog.layout();
                    }
                    dialog.advance_ms(16);
                    dialog.adapter_mut().clear_calls();
                    black_box(dialog.last_layout());
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Dismissal
// ============================================================================

fn bench_dismissal(c: &mut Criterion) {
    let mut group = c.benchmark_group("dialog/dismissal");
    let fresh = || {
        DialogFoundation::with_config(
            RecordingAdapter::new(),
            ManualScheduler::new(),
            DialogConfig::reduced_motion(),
        )
        .expect("default actions are valid")
    };

    let scrim = ClickEvent::new(TestTarget::scrim());
    let button = ClickEvent::new(TestTarget::button("ok"));
    let content = ClickEvent::new(TestTarget::plain().with_class("mdc-dialog__content"));

    for (name, event) in [
        ("resolve_scrim", &scrim),
        ("resolve_button", &button),
        ("resolve_miss", &content),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched_ref(
                fresh,
                |dialog| black_box(dialog.resolve_click_action(black_box(event))),
                BatchSize::SmallInput,
            )
        });
    }

    let escape = KeyboardEvent::key("Escape");
    let enter = KeyboardEvent::key("Enter");
    group.bench_function("keydown", |b| {
        b.iter(|| {
            black_box(black_box(&escape).is_escape());
            black_box(black_box(&enter).is_escape());
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_open_close_cycle,
    bench_layout_batching,
    bench_dismissal,
);

criterion_main!(benches);
