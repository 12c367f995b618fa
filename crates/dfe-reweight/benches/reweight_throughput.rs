use std::fs;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfe_reweight::{evaluate_folder, log_sum_exp};

fn bench_log_sum_exp(c: &mut Criterion) {
    let values: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.37).sin() * 700.0).collect();
    c.bench_function("log_sum_exp_10k", |b| {
        b.iter(|| log_sum_exp(black_box(&values)))
    });
}

fn bench_evaluate_folder(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut weights = String::new();
    for bin in 0..64 {
        let classifier = bin % 4;
        weights.push_str(&format!(
            "{bin} 0 0 {classifier} 0 0 0 0 {}\n",
            1.0 + bin as f64
        ));
    }
    fs::write(dir.path().join("wfile.dat"), weights).unwrap();
    for run in 0..4 {
        let run_dir = dir.path().join(format!("run_{run}"));
        fs::create_dir_all(&run_dir).unwrap();
        let mut lines = String::new();
        for step in 0..5_000 {
            let bin = (step * 7 + run) % 64;
            let classifier = bin % 4;
            lines.push_str(&format!(
                "{step} -1.0 0.0 0.0 0 {bin} 0 0 {classifier} 0 0 0 0\n"
            ));
        }
        fs::write(run_dir.join("energy.dat"), lines).unwrap();
    }
    c.bench_function("evaluate_folder_20k_samples", |b| {
        b.iter(|| evaluate_folder(black_box(dir.path())))
    });
}

criterion_group!(benches, bench_log_sum_exp, bench_evaluate_folder);
criterion_main!(benches);
