use colscan_core::prelude::{Builder, FilterOp, Range, SqlValue};
use colscan_storage::{NumericStorage, Storage};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const ROWS: u32 = 1 << 20;

fn make_column(rows: u32) -> Vec<i64> {
    // Cheap deterministic scramble; values in [0, 1000).
    (0..rows as i64).map(|i| (i * 7919 + 13) % 1000).collect()
}

fn bench_linear_search(c: &mut Criterion) {
    let data = make_column(ROWS);
    let storage = NumericStorage::new(&data);
    let value = SqlValue::Long(500);
    // Unaligned start and end so both partial blocks are exercised.
    let range = Range::new(3, ROWS - 5);

    c.bench_function("linear_aligned_lt", |b| {
        b.iter(|| {
            let mut builder = Builder::new(ROWS);
            storage.linear_search_aligned(FilterOp::Lt, black_box(&value), range, &mut builder);
            black_box(builder.build())
        })
    });
    c.bench_function("linear_unaligned_lt", |b| {
        b.iter(|| {
            let mut builder = Builder::new(ROWS);
            storage.linear_search_unaligned(FilterOp::Lt, black_box(&value), range, &mut builder);
            black_box(builder.build())
        })
    });
}

fn bench_binary_search(c: &mut Criterion) {
    let mut data = make_column(ROWS);
    data.sort_unstable();
    let storage = NumericStorage::new(&data);
    let value = SqlValue::Long(500);
    let full = Range::new(0, ROWS);

    c.bench_function("binary_eq", |b| {
        b.iter(|| black_box(storage.binary_search(FilterOp::Eq, black_box(&value), full)))
    });

    let unsorted = make_column(ROWS);
    let storage = NumericStorage::new(&unsorted);
    let mut index: Vec<u32> = (0..ROWS).collect();
    storage.stable_sort(&mut index);
    c.bench_function("binary_with_index_ge", |b| {
        b.iter(|| {
            black_box(
                storage.binary_search_with_index(FilterOp::Ge, black_box(&value), &index, full),
            )
        })
    });
}

fn bench_stable_sort(c: &mut Criterion) {
    let data = make_column(1 << 16);
    let storage = NumericStorage::new(&data);
    c.bench_function("stable_sort_64k", |b| {
        b.iter(|| {
            let mut out: Vec<u32> = (0..1 << 16).collect();
            storage.stable_sort(&mut out);
            black_box(out)
        })
    });
}

criterion_group!(search, bench_linear_search, bench_binary_search, bench_stable_sort);
criterion_main!(search);
