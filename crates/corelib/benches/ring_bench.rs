use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use corelib::RingBuilder;

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for replicas in [2usize, 64, 256] {
        let mut builder = RingBuilder::new().with_replicas(replicas);
        for i in 0..32 {
            builder = builder.add_host(format!("10.0.0.{i}"));
        }
        let ring = builder.build().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(replicas), &ring, |b, ring| {
            let mut i = 0u64;
            b.iter(|| {
                i += 1;
                black_box(ring.get(&format!("key-{i}")).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_join_quit(c: &mut Criterion) {
    let mut builder = RingBuilder::new().with_replicas(64);
    for i in 0..32 {
        builder = builder.add_host(format!("10.0.0.{i}"));
    }
    let ring = builder.build().unwrap();
    c.bench_function("join_quit_64_vnodes", |b| {
        b.iter(|| {
            ring.join("10.0.1.1").unwrap();
            black_box(ring.quit("10.0.1.1").unwrap())
        })
    });
}

criterion_group!(benches, bench_get, bench_join_quit);
criterion_main!(benches);
