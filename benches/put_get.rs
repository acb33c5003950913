use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
};
use radix_merkle::{Hash, RadixTree, StringValue};

const SIZES: [usize; 5] = [10, 100, 1_000, 10_000, 100_000];

/// Keys are digests of decimal counters, values the counters themselves
fn fixture(n: usize) -> (Vec<Vec<u8>>, Vec<StringValue>) {
    let keys = (0..n)
        .map(|i| Hash::digest(i.to_string().as_bytes()).as_bytes().to_vec())
        .collect();
    let values = (0..n).map(|i| StringValue::from(i.to_string())).collect();
    (keys, values)
}

fn build_tree(keys: &[Vec<u8>], values: &[StringValue]) -> RadixTree<StringValue> {
    keys.iter()
        .zip(values)
        .map(|(k, v)| (k, Some(v.clone())))
        .collect()
}

fn put_get_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_get");
    for size in SIZES {
        let (keys, values) = fixture(size);
        let mut tree = build_tree(&keys, &values);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            let mut i = 0;
            b.iter(|| {
                let k = &keys[i % keys.len()];
                let v = &values[i % values.len()];
                tree.put(k, Some(v.clone()));
                let (got, existed) = tree.get(k);
                assert!(existed && got == Some(v));
                i += 1;
            });
        });
    }
    group.finish();
}

fn hash_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");
    for size in SIZES {
        let (keys, values) = fixture(size);
        let mut tree = build_tree(&keys, &values);

        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter_batched(
                || build_tree(&keys, &values),
                |fresh| black_box(fresh.hash()),
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("after_put", size), &size, |b, _| {
            let mut i = 0;
            b.iter(|| {
                tree.put(&keys[i % keys.len()], Some(values[i % values.len()].clone()));
                i += 1;
                black_box(tree.hash())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, put_get_benches, hash_benches);
criterion_main!(benches);
