use criterion::{criterion_group, criterion_main, Criterion};
use glyphcore::rope::Rope;
use glyphcore::undo::UndoStack;
use std::hint::black_box;

fn rope_at(n: usize) -> Rope {
    let mut rope = Rope::new();
    rope.insert(0, "x".repeat(n).as_bytes()).unwrap();
    rope
}

fn undo_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_operations");

    group.bench_function("record_100", |b| {
        b.iter_batched(
            || UndoStack::new(200),
            |mut stack| {
                for i in 0..100 {
                    stack.record(&rope_at(i + 1), i, format!("edit {i}"));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("undo_redo_small", |b| {
        b.iter_batched(
            || {
                let mut stack = UndoStack::new(200);
                for i in 0..100 {
                    stack.record(&rope_at(i + 1), i, format!("edit {i}"));
                }
                stack
            },
            |mut stack| {
                for _ in 0..50 {
                    black_box(stack.undo());
                }
                for _ in 0..50 {
                    black_box(stack.redo());
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("eviction_under_bound", |b| {
        b.iter_batched(
            || UndoStack::new(16),
            |mut stack| {
                for i in 0..1000 {
                    stack.record(&rope_at((i % 64) + 1), i, "edit");
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, undo_operations);
criterion_main!(benches);
