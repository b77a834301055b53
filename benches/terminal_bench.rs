use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use glyphcore::terminal::parser::Parser;
use glyphcore::terminal::ScreenBuffer;
use std::hint::black_box;

fn terminal_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal_parser");

    let plain: Vec<u8> = "The quick brown fox jumps over the lazy dog.\n"
        .repeat(20)
        .into_bytes();
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("feed_plain_text", |b| {
        b.iter_batched(
            || (Parser::new(), ScreenBuffer::new(40, 120)),
            |(mut parser, mut screen)| {
                parser.feed(&mut screen, black_box(&plain));
            },
            criterion::BatchSize::SmallInput,
        )
    });

    let mut styled = Vec::new();
    for i in 0..200 {
        styled.extend_from_slice(format!("\x1b[{}mtext\x1b[0m", 31 + (i % 7)).as_bytes());
    }
    group.throughput(Throughput::Bytes(styled.len() as u64));
    group.bench_function("feed_sgr_heavy", |b| {
        b.iter_batched(
            || (Parser::new(), ScreenBuffer::new(40, 120)),
            |(mut parser, mut screen)| {
                parser.feed(&mut screen, black_box(&styled));
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn screen_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen_updates");

    group.bench_function("write_char_wrap", |b| {
        let mut screen = ScreenBuffer::new(40, 120);
        b.iter(|| {
            screen.write_char(black_box('x'));
        })
    });

    group.finish();
}

criterion_group!(benches, terminal_throughput, screen_updates);
criterion_main!(benches);
