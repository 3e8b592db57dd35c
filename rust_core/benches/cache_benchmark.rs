use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fieldviz_rust::algorithms::classification;
use fieldviz_rust::core::domain::{Author, CategoryCounts, YearTable};
use fieldviz_rust::core::state::QueryMode;
use fieldviz_rust::preprocessing::cache::build_cache;

fn synthetic_author(years: i32, categories: usize) -> Author {
    let mut table = YearTable::new();
    for year in 0..years {
        let mut counts = CategoryCounts::new();
        for category in 0..categories {
            counts.insert(format!("Subfield {category}"), (year as u64 % 7) + 1);
        }
        table.insert(1990 + year, counts);
    }
    Author {
        id: "A1".to_string(),
        given_name: "Bench".to_string(),
        family_name: "Author".to_string(),
        institution: String::new(),
        orcid: String::new(),
        external_id: String::new(),
        h_index: Some(10.0),
        i10_index: None,
        works_count: None,
        cited_by_count: None,
        subfields_by_year: table.clone(),
        fields_by_year: table,
        topics_by_year: YearTable::new(),
    }
}

fn bench_cache_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_build");

    for (years, categories) in [(10, 4), (40, 8), (40, 32)] {
        let author = synthetic_author(years, categories);
        group.bench_with_input(
            BenchmarkId::new("build", format!("{years}y_{categories}c")),
            &author,
            |b, author| {
                b.iter(|| build_cache(black_box(author)));
            },
        );
    }

    group.finish();
}

fn bench_query_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let cache = build_cache(&synthetic_author(40, 16));
    group.bench_function("counts_for_entire_sweep", |b| {
        b.iter(|| {
            for year in 1990..2030 {
                black_box(classification::counts_for(
                    black_box(&cache),
                    year,
                    QueryMode::Entire,
                ));
            }
        });
    });

    group.bench_function("main_subfield_and_score", |b| {
        b.iter(|| {
            let subfield = classification::main_subfield_for(&cache, 2015, QueryMode::Entire);
            let score = classification::interdisciplinarity(&cache, 2015, QueryMode::Entire);
            black_box((subfield, score));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cache_build, bench_query_path);
criterion_main!(benches);
