use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mab_ranking::{
    Bandit, BetaThompsonConfig, BetaThompsonSampling, Context, DirichletThompsonConfig,
    DirichletThompsonSampling,
};
use std::hint::black_box;

fn bench_choose(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandit_choose");
    for &n_arms in &[8usize, 64usize, 150usize] {
        group.bench_with_input(BenchmarkId::new("beta", n_arms), &n_arms, |b, &n| {
            let mut ts = BetaThompsonSampling::with_seed(n, BetaThompsonConfig::default(), 1)
                .expect("valid bandit");
            // A deterministic, slightly-non-uniform reward history.
            for i in 0..(4 * n) {
                ts.update(i % n, ((i * 7) % 3 == 0) as u8 as f64, None)
                    .expect("valid update");
            }
            b.iter(|| black_box(ts.choose(None).expect("valid posterior")))
        });

        group.bench_with_input(BenchmarkId::new("dirichlet/chained", n_arms), &n_arms, |b, &n| {
            let mut ts =
                DirichletThompsonSampling::with_seed(n, DirichletThompsonConfig::default(), 1)
                    .expect("valid bandit");
            for i in 0..(4 * n) {
                let ctx = Context::with_previous_action((i * 13) % n);
                ts.update(i % n, 1.0, Some(&ctx)).expect("valid update");
            }
            let ctx = Context::with_previous_action(n - 1);
            b.iter(|| black_box(ts.choose(Some(&ctx)).expect("valid posterior")))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_choose);
criterion_main!(benches);
