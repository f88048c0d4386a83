use auxide_probe::config::RunParams;
use auxide_probe::harness::run_probe;
use auxide_probe::report::render_table;
use auxide_probe::units::{DcStep, GatedSine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_probe_run(c: &mut Criterion) {
    let params = RunParams::from_args(Some("4096"), None);
    c.bench_function("probe_run_gated_sine_4096", |b| {
        b.iter(|| {
            let output = run_probe(GatedSine::default(), black_box(params)).unwrap();
            black_box(output.outputs);
        })
    });
    c.bench_function("probe_run_dc_step_4096", |b| {
        b.iter(|| {
            let output = run_probe(DcStep::default(), black_box(params)).unwrap();
            black_box(output.outputs);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let params = RunParams::from_args(Some("1024"), None);
    let output = run_probe(GatedSine::default(), params).unwrap();
    c.bench_function("render_table_1024x2", |b| {
        b.iter(|| black_box(render_table(black_box(&output.outputs))))
    });
}

criterion_group!(benches, bench_probe_run, bench_render);
criterion_main!(benches);
