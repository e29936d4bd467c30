use criterion::{criterion_group, criterion_main, Criterion};
use locmatch::{MatchConfig, Matcher, Metric, OwnedImage, Template};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> OwnedImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    OwnedImage::new(data, width, height).unwrap()
}

fn bench_correlate(c: &mut Criterion) {
    let scene = make_image(256, 256);
    let template = Template::from_view(scene.view().roi(80, 60, 32, 32).unwrap());

    let mut group = c.benchmark_group("correlate_256_tpl_32");
    for metric in [Metric::SqDiff, Metric::CCorrNormed, Metric::CCoeffNormed] {
        let matcher = Matcher::new(template.clone()).with_config(MatchConfig {
            metric,
            parallel: false,
        });
        group.bench_function(format!("{metric:?}"), |b| {
            b.iter(|| {
                let best = matcher.match_image(black_box(scene.view())).unwrap();
                black_box(best);
            })
        });
    }
    group.finish();

    #[cfg(feature = "rayon")]
    {
        let matcher = Matcher::new(template).with_config(MatchConfig {
            metric: Metric::CCoeffNormed,
            parallel: true,
        });
        c.bench_function("correlate_256_tpl_32_parallel", |b| {
            b.iter(|| {
                let surface = matcher.correlate(black_box(scene.view())).unwrap();
                black_box(surface);
            })
        });
    }
}

criterion_group!(benches, bench_correlate);
criterion_main!(benches);
