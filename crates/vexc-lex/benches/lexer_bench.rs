//! Lexer throughput benchmarks.
//!
//! Run with: `cargo bench --package vexc-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vexc_lex::Lexer;
use vexc_lex::Token;

fn token_count(source: &str) -> usize {
    let mut lexer = Lexer::new(source, 1, 0);
    let mut count = 0;
    loop {
        match lexer.next_token() {
            Ok(tok) => {
                count += 1;
                if matches!(tok, Token::Eol { .. }) {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    count
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let dot_call = "dot up + [1 2 3] [4 5 6]";
    group.throughput(Throughput::Bytes(dot_call.len() as u64));
    group.bench_function("dot_call", |b| b.iter(|| token_count(black_box(dot_call))));

    let chained = "0 : 3, + 1 a,";
    group.bench_function("chained_statement", |b| {
        b.iter(|| token_count(black_box(chained)))
    });

    let mix_expr = "mix pos_last cam.pos'3 * dt config.damp";
    group.bench_function("dotted_identifiers_and_arity", |b| {
        b.iter(|| token_count(black_box(mix_expr)))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
