use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqex::{literal, literal_seq, predicate};

fn bench_literal_find_iter(c: &mut Criterion) {
    let haystack: Vec<char> = "ab".repeat(1000).chars().collect();
    let p = literal_seq("ab".chars());
    c.bench_function("literal_seq find_iter over 2000 chars", |b| {
        b.iter(|| {
            let count = p.find_iter(black_box(&haystack)).count();
            black_box(count);
        })
    });
}

fn bench_greedy_repeat(c: &mut Criterion) {
    let haystack: Vec<char> = "a".repeat(5000).chars().collect();
    let p = literal('a').repeat_greedy();
    c.bench_function("repeat_greedy over 5000 'a's", |b| {
        b.iter(|| {
            let m = p.forward(black_box(&haystack), 0).next().unwrap();
            black_box(m.len);
        })
    });
}

fn bench_predicate_repeat_find_iter(c: &mut Criterion) {
    let haystack: Vec<i64> = (0..5000).map(|i| if i % 7 == 0 { 0 } else { i }).collect();
    let p = predicate(|&x: &i64| x != 0).repeat_at_least_greedy(1);
    c.bench_function("predicate repeat_at_least_greedy find_iter over 5000 i64s", |b| {
        b.iter(|| {
            let count = p.find_iter(black_box(&haystack)).count();
            black_box(count);
        })
    });
}

criterion_group!(benches, bench_literal_find_iter, bench_greedy_repeat, bench_predicate_repeat_find_iter);
criterion_main!(benches);
