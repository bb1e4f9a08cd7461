use chained_hashtable::{HashTable, Record, Value};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn record(n: u64) -> Value {
    Record::new()
        .with("id", (n & 0xffff) as u32)
        .with("name", key(n))
        .into()
}

fn bench_put(c: &mut Criterion) {
    c.bench_function("hash_table_put_10k", |b| {
        b.iter_batched(
            HashTable::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.put(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("hash_table_get_hit", |b| {
        let mut m = HashTable::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().cloned().enumerate() {
            m.put(k, i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("hash_table_get_miss", |b| {
        let mut m = HashTable::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.put(key(x), i as u64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(m.get(&k).unwrap());
        })
    });
}

// Fill then drain, so every step of the capacity ladder is crossed twice.
fn bench_grow_shrink(c: &mut Criterion) {
    c.bench_function("hash_table_grow_shrink_5k", |b| {
        let keys: Vec<_> = lcg(3).take(5_000).map(key).collect();
        b.iter_batched(
            HashTable::<String, u64>::new,
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    m.put(k.clone(), i as u64).unwrap();
                }
                for k in &keys {
                    black_box(m.remove(k).unwrap());
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_record_keys(c: &mut Criterion) {
    c.bench_function("hash_table_record_get_hit", |b| {
        let mut m: HashTable<Value, u64> = HashTable::new();
        let seeds: Vec<u64> = lcg(5).take(5_000).collect();
        for (i, s) in seeds.iter().enumerate() {
            m.put(record(*s), i as u64).unwrap();
        }
        // Lookups go through fresh, structurally equal copies.
        let probes: Vec<Value> = seeds.iter().map(|s| record(*s)).collect();
        let mut it = probes.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("hash_table_iterate_10k", |b| {
        let mut m = HashTable::new();
        for (i, x) in lcg(13).take(10_000).enumerate() {
            m.put(key(x), i as u64).unwrap();
        }
        b.iter(|| {
            let sum: u64 = m.value_iter().copied().sum();
            black_box(sum);
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_put, bench_get_hit, bench_get_miss, bench_grow_shrink, bench_record_keys,
        bench_iterate
}
criterion_main!(benches);
