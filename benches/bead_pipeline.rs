use bead_pattern_rs::bead_pipeline::{
    BeadColor, ImageToPatternPipeline, MatchOptions, Palette, PatternConfig, RenderOptions,
    TilingMode, quantize_with_palette, render_beads, split_into_plates,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image::{ImageFormat, Rgb, Rgba, RgbaImage};
use std::io::Cursor;

fn generate_mock_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode mock png");
    bytes
}

fn generate_palette(size: usize) -> Palette {
    let colors = (0..size)
        .map(|i| {
            let v = (i as u32).wrapping_mul(2_654_435_761);
            BeadColor::new(
                format!("c{i}"),
                Rgb([(v >> 16) as u8, (v >> 8) as u8, v as u8]),
                format!("{i:03}"),
                format!("Color {i}"),
            )
        })
        .collect();
    Palette::new(colors).expect("unique ids")
}

fn benchmark_quantize_by_palette_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize_by_palette_size");
    let source = generate_mock_image(800, 600);

    for size in [16, 64, 200] {
        let palette = generate_palette(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &palette, |b, palette| {
            b.iter(|| {
                let _ = quantize_with_palette(
                    black_box(&source),
                    87,
                    58,
                    palette,
                    MatchOptions::default(),
                );
            });
        });
    }

    group.finish();
}

fn benchmark_pipeline_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_by_plates");
    let input = encode_png(&generate_mock_image(1000, 1000));
    let palette = generate_palette(64);

    for plates in [1u32, 2, 4] {
        let config = PatternConfig::builder()
            .plate_width(plates)
            .plate_height(plates)
            .build();
        let pipeline = ImageToPatternPipeline::new(config);

        group.bench_with_input(BenchmarkId::from_parameter(plates), &input, |b, data| {
            b.iter(|| {
                let _ = pipeline.convert(black_box(data), None, &palette);
            });
        });
    }

    group.finish();
}

fn benchmark_tiling_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiling_and_render");
    let palette = generate_palette(64);
    let quantized = quantize_with_palette(
        &generate_mock_image(400, 400),
        116,
        116,
        &palette,
        MatchOptions::default(),
    )
    .expect("quantize");

    group.bench_function("split_into_plates", |b| {
        b.iter(|| {
            let _ = split_into_plates(black_box(&quantized.beads), 4, 4, 29, TilingMode::Strict);
        });
    });

    group.bench_function("render_preview", |b| {
        let options = RenderOptions::preview(116, 116, 400, 8.0);
        b.iter(|| {
            let _ = render_beads(black_box(&quantized.beads), 116, 116, &palette, options);
        });
    });

    group.bench_function("render_thumbnail", |b| {
        let options = RenderOptions::thumbnail(116, 116, 200);
        b.iter(|| {
            let _ = render_beads(black_box(&quantized.beads), 116, 116, &palette, options);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_quantize_by_palette_size,
    benchmark_pipeline_sizes,
    benchmark_tiling_and_render
);
criterion_main!(benches);
