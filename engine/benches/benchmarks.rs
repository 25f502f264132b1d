//! Performance benchmarks for shelf-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shelf_engine::{generate, import, query, Field, RecordStore, SortOrder, ViewState};

fn bench_store_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_operations");

    group.bench_function("load_10k", |b| {
        let books = generate::generate_synthetic(10_000);
        b.iter(|| {
            let mut store = RecordStore::new();
            store.load(black_box(books.clone()))
        })
    });

    group.bench_function("edit", |b| {
        let mut store = RecordStore::new();
        store.load(generate::generate_synthetic(10_000)).unwrap();
        let mut id = 0u64;

        b.iter(|| {
            id = id % 10_000 + 1;
            store.edit(black_box(id), Field::Title, "Edited")
        })
    });

    group.bench_function("reset_10k", |b| {
        let mut store = RecordStore::new();
        store.load(generate::generate_synthetic(10_000)).unwrap();

        b.iter(|| store.reset())
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for size in [1_000, 10_000, 50_000].iter() {
        let books = generate::generate_synthetic(*size);

        group.bench_with_input(BenchmarkId::new("filter_search", size), &books, |b, books| {
            b.iter(|| query::filter(black_box(books), "castle", ""))
        });

        group.bench_with_input(BenchmarkId::new("sort_title", size), &books, |b, books| {
            let all = query::filter(books, "", "");
            b.iter(|| query::sort(black_box(&all), Some(Field::Title), SortOrder::Desc))
        });

        group.bench_with_input(BenchmarkId::new("render_view", size), &books, |b, books| {
            let mut state = ViewState::new();
            state.set_genre("Fantasy");
            state.set_sort_field(Some(Field::PublishedYear));
            b.iter(|| state.render(black_box(books), 50).page.total_items)
        });
    }

    group.finish();
}

fn bench_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv");

    for size in [100, 1_000, 10_000].iter() {
        let books = generate::generate_synthetic(*size);
        let text = import::to_csv_string(&import::export_rows(&books)).unwrap();

        group.bench_with_input(BenchmarkId::new("export", size), &books, |b, books| {
            b.iter(|| import::to_csv_string(&import::export_rows(black_box(books))))
        });

        group.bench_with_input(BenchmarkId::new("import", size), &text, |b, text| {
            b.iter(|| import::import_csv(black_box(text.as_bytes())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_store_operations, bench_queries, bench_csv);
criterion_main!(benches);
