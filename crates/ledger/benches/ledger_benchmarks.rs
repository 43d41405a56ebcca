use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use daybook_auth::Session;
use daybook_ledger::{DayType, LedgerEngine, SortOrder, View};
use daybook_store::MemoryStore;

/// Engine preloaded with a mixed collection: roughly half paid, a seventh
/// soft-deleted, a third half days.
fn populated_engine(records: usize) -> LedgerEngine<MemoryStore> {
    let mut engine = LedgerEngine::open(MemoryStore::new(), Session::new("bench")).unwrap();
    for i in 0..records {
        let date = format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1);
        let day_type = if i % 3 == 0 { DayType::Half } else { DayType::Full };
        let id = engine.add_record(&date, day_type).unwrap();

        if i % 2 == 0 {
            engine.mark_paid(id).unwrap();
            engine.mark_paid(id).unwrap();
        }
        if i % 7 == 0 {
            engine.soft_delete(id).unwrap();
            engine.soft_delete(id).unwrap();
            if i % 2 == 0 {
                // Paid records take one more confirming call.
                engine.soft_delete(id).unwrap();
            }
        }
    }
    engine
}

fn bench_view_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_queries");

    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("list_unpaid_desc", size),
            &size,
            |b, &size| {
                let engine = populated_engine(size);
                b.iter(|| black_box(engine.list_by_view(View::Unpaid, SortOrder::Desc)));
            },
        );

        group.bench_with_input(BenchmarkId::new("totals", size), &size, |b, &size| {
            let engine = populated_engine(size);
            b.iter(|| black_box(engine.totals()));
        });
    }

    group.finish();
}

fn bench_mutation_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation_path");
    group.sample_size(1000);

    // Benchmark: append to a fresh ledger (collection grows as it runs)
    group.bench_function("add_record", |b| {
        let mut engine = LedgerEngine::open(MemoryStore::new(), Session::new("bench")).unwrap();
        b.iter(|| {
            engine
                .add_record(black_box("2024-03-15"), DayType::Full)
                .unwrap();
        });
    });

    // Benchmark: full two-call paid protocol plus the reset, steady state
    group.bench_function("mark_paid_confirm_cycle", |b| {
        let mut engine = populated_engine(1_000);
        let id = engine.add_record("2024-06-15", DayType::Full).unwrap();
        b.iter(|| {
            engine.mark_paid(id).unwrap();
            engine.mark_paid(id).unwrap();
            engine.mark_unpaid(id).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_view_queries, bench_mutation_path);
criterion_main!(benches);
