use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scribble::{Evaluator, MemorySink, Parser, Scanner};
use std::sync::Arc;

const SOURCE: &str = "
    sum = 0
    i = 1
    while (i <= 100) {
        if (i % 2 == 0) {
            sum = sum + i
        }
        i = i + 1
    }
    print(sum)
";

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize loop program", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(SOURCE));
            scanner.scan_tokens().unwrap()
        })
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let tokens = Scanner::new(SOURCE).scan_tokens().unwrap();

    c.bench_function("parse loop program", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(tokens.clone()));
            parser.parse().unwrap()
        })
    });
}

fn pipeline_benchmark(c: &mut Criterion) {
    c.bench_function("build and run loop program", |b| {
        b.iter(|| {
            let tokens = Scanner::new(black_box(SOURCE)).scan_tokens().unwrap();
            let program = Parser::new(tokens).parse().unwrap();
            let mut evaluator = Evaluator::new(Arc::new(MemorySink::new()));
            evaluator.execute(&program).unwrap()
        })
    });
}

criterion_group!(benches, lexer_benchmark, parser_benchmark, pipeline_benchmark);
criterion_main!(benches);
