//! Benchmarks for pagemark conversion performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagemark::reconstruct::{ReconstructOptions, TextReconstructor};
use pagemark::render::{DiscardWriter, RenderOptions};

/// Creates a synthetic note with the given number of sections.
fn create_test_markdown(sections: usize) -> String {
    let mut content = String::new();
    for i in 0..sections {
        content.push_str(&format!("## Section {}\n\n", i + 1));
        content.push_str("Some prose with a [link](https://example.com) in it.\n\n");
        content.push_str("- first point\n- second point\n\n");
        content.push_str("```\nlet x = 1;\n```\n\n");
    }
    content
}

/// Creates flat page text like an extractor would return.
fn create_test_page_text(lines: usize) -> String {
    (0..lines)
        .map(|i| match i % 6 {
            0 => format!("# Heading {}", i),
            1 | 2 => String::new(),
            3 => "*   loose bullet".to_string(),
            4 => format!("{}.  item", i),
            _ => "  plain text line  ".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Benchmark parsing alone.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for sections in [10, 100, 1000].iter() {
        let data = create_test_markdown(*sections);
        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| pagemark::parse(black_box(data.as_bytes())).unwrap());
        });
    }

    group.finish();
}

/// Benchmark parse plus render, with and without the TOC pre-pass.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let data = create_test_markdown(200);

    for toc in [false, true] {
        let options = RenderOptions::new().with_toc(toc);
        group.bench_function(format!("toc_{}", toc), |b| {
            b.iter(|| {
                pagemark::render_markdown(black_box(data.as_bytes()), &options, &mut DiscardWriter)
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark reconstruction throughput.
fn bench_reconstruct(c: &mut Criterion) {
    let text = create_test_page_text(10_000);
    let reconstructor = TextReconstructor::new(ReconstructOptions::new().with_frontmatter(false));

    c.bench_function("reconstruct_10k_lines", |b| {
        b.iter(|| reconstructor.reconstruct(black_box(&text)));
    });
}

criterion_group!(benches, bench_parse, bench_render, bench_reconstruct);
criterion_main!(benches);
