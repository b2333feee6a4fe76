use criterion::{criterion_group, criterion_main, Criterion};
use regiondb_core::prelude::*;
use regiondb_core::IndexStorage;
use std::hint::black_box;

const SYLLABLES: [(&str, &str); 8] = [
    ("东", "dong"),
    ("南", "nan"),
    ("山", "shan"),
    ("海", "hai"),
    ("河", "he"),
    ("安", "an"),
    ("平", "ping"),
    ("城", "cheng"),
];

/// Synthetic three-tier dataset: 10 provinces x 10 cities x 10 districts.
fn dataset() -> Vec<RegionRaw> {
    let mut out = Vec::new();
    let name = |i: usize, j: usize| {
        let (a, pa) = SYLLABLES[i % SYLLABLES.len()];
        let (b, pb) = SYLLABLES[j % SYLLABLES.len()];
        (format!("{a}{b}"), format!("{pa} {pb}"), format!("{}{}", &pa[..1], &pb[..1]))
    };

    for p in 0..10 {
        let (pn, pp, ps) = name(p, p + 3);
        let p_code = format!("{:02}0000", 11 + p);
        out.push(RegionRaw::new(&p_code, format!("{pn}省"), "省级").with_pinyin(format!("{pp} sheng"), &ps));
        for c in 0..10 {
            let (cn, cp, cs) = name(c, p);
            let c_code = format!("{:02}{:02}00", 11 + p, c + 1);
            out.push(
                RegionRaw::new(&c_code, format!("{cn}市"), "市级")
                    .with_parent(&p_code, format!("{pn}省"))
                    .with_pinyin(format!("{cp} shi"), &cs)
                    .with_full_path(format!("{pn}省>{cn}市")),
            );
            for d in 0..10 {
                let (dn, dp, ds) = name(d + c, d);
                out.push(
                    RegionRaw::new(format!("{:02}{:02}{:02}", 11 + p, c + 1, d + 1), format!("{dn}区"), "区县级")
                        .with_parent(&c_code, format!("{cn}市"))
                        .with_pinyin(format!("{dp} qu"), &ds)
                        .with_full_path(format!("{pn}省>{cn}市>{dn}区")),
                );
            }
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let raw = dataset();
    c.bench_function("build_all_indices_1110", |b| {
        b.iter(|| IndexBuilder::new(black_box(raw.clone())).build_all_indices())
    });
}

fn bench_storage(c: &mut Criterion) {
    let index = IndexBuilder::new(dataset()).build_all_indices();
    for (label, mode) in [("plain", CompressionMode::None), ("default", CompressionMode::default())] {
        let storage = IndexStorage::new(mode);
        let bytes = storage.to_bytes(&index).expect("encode");
        c.bench_function(&format!("encode_{label}"), |b| {
            b.iter(|| storage.to_bytes(black_box(&index)).expect("encode"))
        });
        c.bench_function(&format!("decode_{label}"), |b| {
            b.iter(|| storage.from_bytes(black_box(&bytes)).expect("decode"))
        });
    }
}

fn bench_search(c: &mut Criterion) {
    let engine = RegionSearchEngine::new().with_index(IndexBuilder::new(dataset()).build_all_indices());
    for query in ["东南", "dongnan", "dn", "dongnam", "东南市>"] {
        c.bench_function(&format!("search_{query}"), |b| {
            b.iter(|| engine.search(black_box(query), 10, SearchType::Auto).expect("search"))
        });
    }
}

criterion_group!(benches, bench_build, bench_storage, bench_search);
criterion_main!(benches);
