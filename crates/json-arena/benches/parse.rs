use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use json_arena::{parse, parse_value, Lexer, ParseOptions};

/// A document of `records` expense entries, roughly the shape of a reporting feed.
fn sample_document(records: usize) -> String {
    let entries: Vec<String> = (0..records)
        .map(|i| {
            format!(
                r#"{{"id":{i},"who":"person {i}","amount":{}.25,"paid":{},"tags":["car","food",null],"week":{{"number":"{}"}}}}"#,
                i * 3,
                i % 2 == 0,
                i % 52
            )
        })
        .collect();
    format!(r#"{{"records":[{}]}}"#, entries.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for records in [10, 100, 1000] {
        let text = sample_document(records);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("lex", records), &text, |b, text| {
            b.iter(|| Lexer::from_text(black_box(text)).count())
        });
        group.bench_with_input(BenchmarkId::new("arena", records), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("value", records), &text, |b, text| {
            b.iter(|| parse_value(black_box(text), &ParseOptions::default()))
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let text = sample_document(1000);
    let arena = parse(&text).expect("sample document parses");
    let mut group = c.benchmark_group("query");

    group.bench_function("sum_paid_amounts", |b| {
        b.iter(|| {
            arena
                .result_set()
                .at("records")
                .iter()
                .filter(|record| record.at("paid").as_boolean() == Some(true))
                .filter_map(|record| record.at("amount").as_float())
                .sum::<f64>()
        })
    });
    group.bench_function("render", |b| b.iter(|| arena.result_set().to_string()));

    group.finish();
}

criterion_group!(benches, bench_parse, bench_query);
criterion_main!(benches);
