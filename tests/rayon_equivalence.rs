#![cfg(feature = "rayon")]

use locmatch::{MatchConfig, Matcher, Metric, OwnedImage, Template};

fn make_image(width: usize, height: usize) -> OwnedImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    OwnedImage::new(data, width, height).unwrap()
}

#[test]
fn parallel_surface_equals_sequential_surface() {
    let scene = make_image(120, 90);
    let template = Template::from_view(scene.view().roi(47, 31, 17, 13).unwrap());

    for metric in Metric::ALL {
        let seq = Matcher::new(template.clone()).with_config(MatchConfig {
            metric,
            parallel: false,
        });
        let par = Matcher::new(template.clone()).with_config(MatchConfig {
            metric,
            parallel: true,
        });

        let seq_surface = seq.correlate(scene.view()).unwrap();
        let par_surface = par.correlate(scene.view()).unwrap();
        assert_eq!(seq_surface, par_surface, "metric {metric:?}");
        assert_eq!(
            seq.locate(&seq_surface).unwrap(),
            par.locate(&par_surface).unwrap(),
            "metric {metric:?}"
        );
    }
}

#[test]
fn parallel_single_row_surface() {
    let scene = make_image(40, 6);
    let template = Template::from_view(scene.view().roi(12, 0, 5, 6).unwrap());
    let matcher = Matcher::new(template).with_config(MatchConfig {
        metric: Metric::SqDiff,
        parallel: true,
    });
    let surface = matcher.correlate(scene.view()).unwrap();
    assert_eq!(surface.dims(), (1, 36));
    let best = matcher.locate(&surface).unwrap();
    assert_eq!((best.x, best.y, best.score), (12, 0, 0.0));
}
