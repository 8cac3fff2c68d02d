use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mazecore::{solve, solve_all, Algorithm, Difficulty, Generator};

const WIDTH: usize = 120;
const HEIGHT: usize = 80;
const SEED: u64 = 0x5eed;

pub fn generation(c: &mut Criterion) {
    for difficulty in Difficulty::ALL {
        c.bench_function(&format!("generate_{}", difficulty), |b| {
            b.iter(|| {
                Generator::new(difficulty)
                    .with_seed(SEED)
                    .generate(black_box(WIDTH), black_box(HEIGHT))
                    .unwrap()
            })
        });
    }
}

pub fn solvers(c: &mut Criterion) {
    let grid = Generator::new(Difficulty::Hard)
        .with_seed(SEED)
        .generate(WIDTH, HEIGHT)
        .unwrap();

    for algorithm in Algorithm::ALL {
        c.bench_function(&format!("solve_{}", algorithm), |b| {
            b.iter(|| solve(black_box(&grid), algorithm).unwrap())
        });
    }

    c.bench_function("solve_all", |b| b.iter(|| solve_all(black_box(&grid)).unwrap()));
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = generation, solvers}
criterion_main!(benches);
