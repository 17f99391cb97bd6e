use arcade_core::random_free_cell;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

/// Board with every cell taken except the last `free` ones in row-major order.
fn crowded_board(size: usize, free: usize) -> Array2<bool> {
    let mut occupied = Array2::from_elem((size, size), true);
    let total = size * size;
    for index in total - free.min(total)..total {
        occupied[[index / size, index % size]] = false;
    }
    occupied
}

fn bench_food_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_free_cell");
    for (size, free) in [(15, 200), (15, 1), (255, 1), (255, 10_000)] {
        let occupied = crowded_board(size, free);
        let mut rng = SmallRng::seed_from_u64(0);
        group.bench_with_input(
            BenchmarkId::new(format!("{size}x{size}"), free),
            &occupied,
            |b, occupied| b.iter(|| random_free_cell(black_box(occupied), &mut rng)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_food_placement);
criterion_main!(benches);
