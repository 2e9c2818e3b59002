use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use itemcheck_criteria::{CompiledCriterion, CriterionRow, Matcher, Record, StrategyTable};

fn create_test_record(id: usize) -> Record {
    Record::new()
        .with("id", id as i64)
        .with("name", format!("Item {id}"))
        .with("description", format!("Descripción del item número {id}"))
        .with("category", if id % 2 == 0 { "Muebles" } else { "Electrónica" })
        .with("price", (id % 500) as f64 + 0.99)
        .with("stock", (id % 20) as i64)
        .with("available", id % 3 != 0)
}

fn create_records(count: usize) -> Vec<Record> {
    (0..count).map(create_test_record).collect()
}

fn sample_criteria() -> Vec<CriterionRow> {
    vec![
        CriterionRow::new().with("price", ">400").with("available", "True"),
        CriterionRow::new().with("description", "número 7"),
        CriterionRow::new().with("category", "Muebles").with("stock", "<5"),
    ]
}

fn bench_match_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_rows");
    let matcher = Matcher::default();
    let criteria = sample_criteria();

    for count in [10, 100, 1_000, 10_000] {
        let records = create_records(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("records", count), &records, |b, records| {
            b.iter(|| matcher.match_rows(black_box(records), black_box(&criteria)))
        });
    }
    group.finish();
}

fn bench_evaluate_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_rows");
    let matcher = Matcher::default();
    let mut criteria = sample_criteria();
    criteria.push(CriterionRow::new().with("price", ">100000"));

    for count in [100, 10_000] {
        let records = create_records(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("records", count), &records, |b, records| {
            b.iter(|| matcher.evaluate_rows(black_box(records), black_box(&criteria)))
        });
    }
    group.finish();
}

fn bench_single_criterion(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_criterion");
    let table = StrategyTable::default();
    let row = CriterionRow::new()
        .with("price", ">100")
        .with("description", "item")
        .with("available", "true");
    let compiled = CompiledCriterion::compile(&row, &table);
    let record = create_test_record(250);

    group.throughput(Throughput::Elements(1));
    group.bench_function("compile", |b| {
        b.iter(|| CompiledCriterion::compile(black_box(&row), black_box(&table)))
    });
    group.bench_function("matches", |b| b.iter(|| compiled.matches(black_box(&record))));
    group.finish();
}

criterion_group!(
    benches,
    bench_match_rows,
    bench_evaluate_rows,
    bench_single_criterion
);
criterion_main!(benches);
