use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use xheap::{FixedArena, Heap};

pub fn bench_heap(c: &mut Criterion) {
    c.bench_function("allocate_release_churn", |b| {
        b.iter_batched(
            || Heap::new(FixedArena::new(1 << 20)),
            |mut heap| {
                for _ in 0..64 {
                    let ptr = heap.allocate(black_box(48)).unwrap();
                    heap.release(ptr.as_ptr());
                }
                heap
            },
            BatchSize::SmallInput,
        )
    });

    // every other block is freed, so the first-fit scan has to step over the
    // pinned ones before it can reuse anything
    c.bench_function("first_fit_scan_fragmented", |b| {
        b.iter_batched(
            || {
                let mut heap = Heap::new(FixedArena::new(1 << 20));
                let ptrs: Vec<_> = (0..256).map(|_| heap.allocate(32).unwrap()).collect();
                for ptr in ptrs.iter().step_by(2) {
                    heap.release(ptr.as_ptr());
                }
                heap
            },
            |mut heap| {
                let ptr = heap.allocate(black_box(32)).unwrap();
                heap.release(ptr.as_ptr());
                heap
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_heap);
criterion_main!(benches);
