use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qlisp::lexer::tokenize;
use qlisp::run;

// A reasonably complex input string for benchmarking
const BENCH_INPUT: &str = r#"
(+ 1 2 3 4 5 6 7 8 9 10) ; plain arithmetic
(* (+ 1 2) (- 10 3) (/ 100 5 2))
(- 5)
; list plumbing
(list 1 2 3 4 5)
(head {1 2 3 4 5})
(tail {1 2 3 4 5})
(join {1 2} {3 4} {5 6})
(eval {+ 1 (* 2 3)})
(eval (head {(+ 1 2) (+ 10 20)}))
; deeply nested reduction
(+ 1 (+ 2 (+ 3 (+ 4 (+ 5 (+ 6 (+ 7 (+ 8 (+ 9 10)))))))))
{this list is inert (even (this)) {and this}}
"#;

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lexer");

    group.bench_with_input(
        BenchmarkId::new("tokenize", "complex_input"),
        &BENCH_INPUT,
        |b, input| b.iter(|| tokenize(black_box(input))),
    );

    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");

    // Full lex -> parse -> read -> eval pipeline, one line at a time (the
    // REPL's unit of work)
    group.bench_with_input(
        BenchmarkId::new("run", "complex_input"),
        &BENCH_INPUT,
        |b, input| {
            b.iter(|| {
                for line in input.lines() {
                    let _ = run(black_box(line));
                }
            })
        },
    );

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_run);
criterion_main!(benches);
