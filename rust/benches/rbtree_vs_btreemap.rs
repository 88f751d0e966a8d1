use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rbtree::RBTree;
use std::collections::BTreeMap;

const SIZES: [i32; 3] = [100, 1_000, 10_000];

fn shuffled(n: i32) -> Vec<i32> {
    // Multiplicative scatter over a prime keeps the benches deterministic.
    (0..n).map(|i| (i * 7_919) % 10_007).collect()
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for size in SIZES {
        let keys = shuffled(size);

        group.bench_with_input(BenchmarkId::new("rbtree", size), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = RBTree::new();
                for &k in keys {
                    tree.insert(black_box(k), k);
                }
                black_box(tree)
            })
        });

        group.bench_with_input(BenchmarkId::new("rbtree_multi", size), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = RBTree::multi();
                for &k in keys {
                    tree.insert(black_box(k % 64), k);
                }
                black_box(tree)
            })
        });

        group.bench_with_input(BenchmarkId::new("btreemap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in keys {
                    map.insert(black_box(k), k);
                }
                black_box(map)
            })
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in SIZES {
        let keys = shuffled(size);
        let tree: RBTree<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
        let map: BTreeMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("rbtree", size), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(tree.get(black_box(k)));
                }
            })
        });

        group.bench_function(BenchmarkId::new("btreemap", size), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(map.get(black_box(k)));
                }
            })
        });
    }

    group.finish();
}

fn bench_deletion(c: &mut Criterion) {
    let mut group = c.benchmark_group("deletion");

    for size in SIZES {
        let keys = shuffled(size);
        let tree: RBTree<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
        let map: BTreeMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("rbtree", size), |b| {
            b.iter(|| {
                let mut tree = tree.clone();
                for k in &keys {
                    black_box(tree.delete(k));
                }
            })
        });

        group.bench_function(BenchmarkId::new("btreemap", size), |b| {
            b.iter(|| {
                let mut map = map.clone();
                for k in &keys {
                    black_box(map.remove(k));
                }
            })
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    let tree: RBTree<i32, i32> = (0..10_000).map(|i| (i, i * 10)).collect();
    let map: BTreeMap<i32, i32> = (0..10_000).map(|i| (i, i * 10)).collect();

    group.bench_function("rbtree_iter", |b| {
        b.iter(|| black_box(tree.iter().map(|(_, v)| *v as i64).sum::<i64>()))
    });

    group.bench_function("btreemap_iter", |b| {
        b.iter(|| black_box(map.iter().map(|(_, v)| *v as i64).sum::<i64>()))
    });

    group.bench_function("rbtree_for_each", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            tree.for_each(|_, v| sum += *v as i64);
            black_box(sum)
        })
    });

    group.finish();
}

fn bench_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_queries");

    let tree: RBTree<i32, i32> = (0..10_000).map(|i| (i, i * 10)).collect();
    let map: BTreeMap<i32, i32> = (0..10_000).map(|i| (i, i * 10)).collect();

    group.bench_function("rbtree_small_range", |b| {
        b.iter(|| {
            let items: Vec<_> = tree.range(black_box(4990)..black_box(5010)).collect();
            black_box(items);
        })
    });

    group.bench_function("btreemap_small_range", |b| {
        b.iter(|| {
            let items: Vec<_> = map.range(black_box(4990)..black_box(5010)).collect();
            black_box(items);
        })
    });

    group.bench_function("rbtree_large_range", |b| {
        b.iter(|| {
            let items: Vec<_> = tree.range(black_box(2000)..black_box(8000)).collect();
            black_box(items);
        })
    });

    group.bench_function("btreemap_large_range", |b| {
        b.iter(|| {
            let items: Vec<_> = map.range(black_box(2000)..black_box(8000)).collect();
            black_box(items);
        })
    });

    group.bench_function("rbtree_bound", |b| {
        b.iter(|| black_box(tree.bound(black_box(&4990), Some(black_box(&5010)))))
    });

    group.bench_function("rbtree_lower_bound", |b| {
        b.iter(|| black_box(tree.lower_bound(black_box(&4321))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_lookup,
    bench_deletion,
    bench_iteration,
    bench_ranges
);
criterion_main!(benches);
