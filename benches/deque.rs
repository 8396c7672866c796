use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sync_deque::ThreadSafeDeque;

fn push_pop_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop_single_thread");
    for size in [100usize, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("thread_safe_deque", size), size, |b, &size| {
            let deque = ThreadSafeDeque::with_capacity(size);
            b.iter(|| {
                for i in 0..size {
                    deque.push_back(black_box(i));
                }
                while let Some(v) = deque.pop_front() {
                    black_box(v);
                }
            });
        });
    }
    group.finish();
}

fn producers_to_waiting_consumer(c: &mut Criterion) {
    let mut group = c.benchmark_group("producers_to_waiting_consumer");
    for producers in [1usize, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("wait_pop_front", producers), producers, |b, &producers| {
            const PER_PRODUCER: usize = 1000;
            b.iter(|| {
                let deque = ThreadSafeDeque::new();
                let handles: Vec<_> = (0..producers)
                    .map(|_| {
                        let deque = deque.clone();
                        thread::spawn(move || {
                            for i in 0..PER_PRODUCER {
                                deque.push_back(i);
                            }
                        })
                    })
                    .collect();
                for _ in 0..producers * PER_PRODUCER {
                    black_box(deque.wait_pop_front(None));
                }
                for h in handles {
                    h.join().unwrap();
                }
            });
        });
    }
    group.finish();
}

fn remove_if_scan(c: &mut Criterion) {
    c.bench_function("remove_if_half_of_10000", |b| {
        b.iter(|| {
            let deque: ThreadSafeDeque<usize> = (0..10000).collect();
            deque.remove_if(|v| v % 2 == 0);
            black_box(deque.len())
        });
    });
}

criterion_group!(benches, push_pop_single_thread, producers_to_waiting_consumer, remove_if_scan);
criterion_main!(benches);
