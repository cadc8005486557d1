use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use date_expr::DateExpr;

const TEMPLATES: &[&str] = &[
    "%Y",
    "%Y/%m/%d",
    "%Y-%m-%dT%H:%M:%S",
    "s3://bucket/foo/%Y/%m/%d/bar/%H.%M/file-A",
    "%H.%M%z",
];

const NOW: i64 = 1407949842;
const SERIES_SPAN: i64 = 3600; // one hour of minute/second steps

pub fn format_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    for template in TEMPLATES {
        let expr = DateExpr::new(*template);
        group.bench_with_input(BenchmarkId::from_parameter(template), &expr, |b, expr| {
            b.iter(|| expr.format(NOW).unwrap())
        });
    }
    group.finish();
}

pub fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for template in TEMPLATES {
        let expr = DateExpr::new(*template);
        let rendered = expr.format(NOW).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(template),
            &(&expr, &rendered),
            |b, (expr, rendered)| b.iter(|| expr.parse(rendered).unwrap()),
        );
    }
    group.finish();
}

pub fn series_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");
    for template in TEMPLATES {
        let expr = DateExpr::new(*template);
        if expr.granularity().is_none() {
            continue;
        }
        group.bench_with_input(BenchmarkId::from_parameter(template), &expr, |b, expr| {
            b.iter(|| expr.series(NOW, NOW + SERIES_SPAN).unwrap().count())
        });
    }
    group.finish();
}

criterion_group!(benches, format_benchmark, parse_benchmark, series_benchmark);
criterion_main!(benches);
