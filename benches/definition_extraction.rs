use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rimcomplete::models::DEF_TYPES;
use rimcomplete::parsers::{ExtractMode, extract_definitions_with_mode};

/// Generate a Defs document with `num_defs` definitions spread over all tag types
fn generate_document(num_defs: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Defs>\n");
    for i in 0..num_defs {
        let tag = DEF_TYPES[i % DEF_TYPES.len()].tag;
        if i % 10 == 0 {
            xml.push_str(&format!("  <{} Name=\"Base{}\" Abstract=\"True\" />\n", tag, i));
        }
        xml.push_str(&format!(
            "  <{tag} ParentName=\"Base\">\n    <defName>Def{i}</defName>\n    <label>def {i}</label>\n  </{tag}>\n"
        ));
    }
    xml.push_str("</Defs>\n");
    xml
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_definitions");

    for size in [10, 100, 1_000, 10_000].iter() {
        let document = generate_document(*size);
        group.throughput(Throughput::Bytes(document.len() as u64));

        for mode in [ExtractMode::Compatible, ExtractMode::Strict] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), size),
                &document,
                |b, document| b.iter(|| extract_definitions_with_mode(black_box(document), mode)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
