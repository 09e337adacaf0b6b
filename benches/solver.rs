use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pigment_mix::{
    paint_catalog, BeerLambertMixer, GenericPaletteOptimizer, InverseMixSolver, NearestMatchIndex,
    PaletteKind, PaletteRegistry, RecipeStrategy, Rgb,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TARGET: Rgb = Rgb::new(141, 147, 173);

fn benchmark_inverse_solve(c: &mut Criterion) {
    let five = InverseMixSolver::for_standard(PaletteKind::FivePigment).unwrap();
    let eight = InverseMixSolver::for_standard(PaletteKind::EightPigment).unwrap();

    c.bench_function("inverse_solve_5", |b| b.iter(|| five.solve(black_box(TARGET))));
    c.bench_function("inverse_solve_8", |b| b.iter(|| eight.solve(black_box(TARGET))));
}

fn benchmark_optimizer(c: &mut Criterion) {
    let palette = PaletteRegistry::standard()
        .palette(PaletteKind::FivePigment)
        .clone();
    let optimizer = GenericPaletteOptimizer::new(palette, BeerLambertMixer::bundled());

    c.bench_function("hill_climb_500", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            optimizer.optimize(black_box(TARGET), &mut rng)
        })
    });
}

fn benchmark_recipe_and_lookup(c: &mut Criterion) {
    let strategy = RecipeStrategy::standard().unwrap();
    let index = NearestMatchIndex::new(paint_catalog());

    c.bench_function("recipe_build", |b| b.iter(|| strategy.build(black_box(TARGET))));
    c.bench_function("nearest_paint", |b| b.iter(|| index.nearest(black_box(TARGET))));
}

criterion_group!(
    benches,
    benchmark_inverse_solve,
    benchmark_optimizer,
    benchmark_recipe_and_lookup
);
criterion_main!(benches);
