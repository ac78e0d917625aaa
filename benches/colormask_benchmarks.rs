//! Performance benchmarks for colormask
//!
//! Measures the detectors and conversions across image sizes to track
//! regressions.

use colormask::{
    rgb_to_hsv, rgb_to_lab, ApplyMaskExt, ColorDistanceConfig, ColorDistanceDetector,
    DistanceSpace, HueSaturationBand, HueSaturationBandExt, Image,
};
use criterion::*;
use image::{Luma, Rgb};
use itertools::iproduct;
use std::hint::black_box;

const SIZES: [(u32, u32); 4] = [
    (100, 100),   // Small
    (500, 500),   // Medium
    (1000, 1000), // Large
    (1920, 1080), // HD
];

/// Helper function to create a test RGB image with specific dimensions
fn create_rgb_image(width: u32, height: u32) -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(width, height);

    // Fill with realistic pattern (gradient + content)
    iproduct!(0..height, 0..width).for_each(|(y, x)| {
        let r = ((x * 255) / width) as u8;
        let g = ((y * 255) / height) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        image.put_pixel(x, y, Rgb([r, g, b]));
    });

    image
}

/// Benchmark color distance classification in both spaces
fn bench_color_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_distance");
    group.sample_size(10);

    for (width, height) in SIZES {
        group.throughput(Throughput::Elements(u64::from(width * height)));
        let image = create_rgb_image(width, height);

        for space in [DistanceSpace::Rgb, DistanceSpace::Lab] {
            let mut detector = ColorDistanceDetector::with_target(Rgb([130, 190, 230]), 100, space);
            group.bench_with_input(
                BenchmarkId::new(format!("process_{:?}", space), format!("{}x{}", width, height)),
                &image,
                |b, img| b.iter(|| black_box(detector.process(img).unwrap().len())),
            );
        }

        let config = ColorDistanceConfig::new(Rgb([130, 190, 230]), 100, DistanceSpace::Rgb);
        group.bench_with_input(
            BenchmarkId::new("detect_Rgb", format!("{}x{}", width, height)),
            &image,
            |b, img| b.iter(|| black_box(config.detect(img).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark hue/saturation band detection
fn bench_hue_saturation(c: &mut Criterion) {
    let band = HueSaturationBand::new(160, 10, 25, 166);

    let mut group = c.benchmark_group("hue_saturation");
    group.sample_size(10);

    for (width, height) in SIZES {
        group.throughput(Throughput::Elements(u64::from(width * height)));
        let image = create_rgb_image(width, height);

        group.bench_with_input(
            BenchmarkId::new("detect", format!("{}x{}", width, height)),
            &image,
            |b, img| b.iter(|| black_box(img.detect_hue_saturation_band(&band).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark whole-image color conversions
fn bench_convert_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_color");
    group.sample_size(10);

    for (width, height) in SIZES {
        group.throughput(Throughput::Elements(u64::from(width * height)));
        let image = create_rgb_image(width, height);

        group.bench_with_input(
            BenchmarkId::new("rgb_to_lab", format!("{}x{}", width, height)),
            &image,
            |b, img| b.iter(|| black_box(rgb_to_lab(img))),
        );
        group.bench_with_input(
            BenchmarkId::new("rgb_to_hsv", format!("{}x{}", width, height)),
            &image,
            |b, img| b.iter(|| black_box(rgb_to_hsv(img))),
        );
    }

    group.finish();
}

/// Benchmark mask compositing
fn bench_apply_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_mask");
    group.sample_size(10);

    for (width, height) in SIZES {
        group.throughput(Throughput::Elements(u64::from(width * height)));
        let image = create_rgb_image(width, height);
        let mask: Image<Luma<u8>> =
            Image::from_fn(width, height, |x, y| Luma([if (x + y) % 2 == 0 { 255 } else { 0 }]));

        group.bench_with_input(
            BenchmarkId::new("keep_masked", format!("{}x{}", width, height)),
            &(image, mask),
            |b, (img, mask)| b.iter(|| black_box(img.keep_masked(mask, Rgb([0, 0, 0])).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_color_distance,
    bench_hue_saturation,
    bench_convert_color,
    bench_apply_mask
);
criterion_main!(benches);
