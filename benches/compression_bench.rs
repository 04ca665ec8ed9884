use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};
use tempfile::TempDir;
use webp_squeeze::{encode_webp, normalize_to_rgb, resize_to_max_width, transform_image, TransformConfig};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, (x % 255) as u8])
    })
}

fn bench_normalize(c: &mut Criterion) {
    let img = DynamicImage::ImageRgba8(gradient(1920, 1080));

    c.bench_function("normalize_rgba_1080p", |b| {
        b.iter(|| normalize_to_rgb(black_box(img.clone())))
    });
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_to_max_width");

    for (width, height) in [(800, 600), (1920, 1080), (3840, 2160)] {
        let rgb = normalize_to_rgb(DynamicImage::ImageRgba8(gradient(width, height)));
        group.bench_with_input(
            BenchmarkId::new("lanczos3", format!("{}x{}", width, height)),
            &rgb,
            |b, rgb| b.iter(|| resize_to_max_width(black_box(rgb.clone()), 300)),
        );
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_webp");
    let rgb = normalize_to_rgb(DynamicImage::ImageRgba8(gradient(300, 200)));

    for quality in [50u8, 85, 95] {
        group.bench_with_input(BenchmarkId::from_parameter(quality), &quality, |b, &q| {
            b.iter(|| encode_webp(black_box(&rgb), q))
        });
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.png");
    gradient(1200, 800).save(&input).unwrap();
    let config = TransformConfig::new(None, None, Some(temp_dir.path().join("out"))).unwrap();

    c.bench_function("transform_png_1200x800", |b| {
        b.iter(|| transform_image(black_box(&input), black_box(&config)))
    });
}

criterion_group!(benches, bench_normalize, bench_resize, bench_encode, bench_transform);
criterion_main!(benches);
