use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};
use inference::InferenceOutput;
use inference::processing::{
    post::{ImageBounds, PostProcessor},
    pre::PreProcessor,
};
use ndarray::{Array, IxDyn};

/// Gradient image, more realistic than a solid color
fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 255) / width) as u8,
            ((y * 255) / height) as u8,
            (((x + y) * 127) / (width + height)) as u8,
        ])
    })
}

/// Mock detector output with `num_detections` confident candidates out of `num_candidates`
fn create_mock_output(num_candidates: usize, num_detections: usize) -> InferenceOutput {
    let mut labels = vec![0i64; num_candidates];
    let mut boxes = vec![0.0f32; num_candidates * 4];
    let mut scores = vec![0.01f32; num_candidates];

    for i in 0..num_detections.min(num_candidates) {
        labels[i] = (i % 9) as i64;
        boxes[i * 4..i * 4 + 4].copy_from_slice(&[100.0, 100.0, 200.0, 200.0]);
        scores[i] = 0.9;
    }

    InferenceOutput {
        boxes: Array::from_shape_vec(IxDyn(&[num_candidates, 4]), boxes).unwrap(),
        labels: Array::from_shape_vec(IxDyn(&[num_candidates]), labels).unwrap(),
        scores: Array::from_shape_vec(IxDyn(&[num_candidates]), scores).unwrap(),
    }
}

fn benchmark_preprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocessing");
    let preprocessor = PreProcessor::new();

    for (width, height) in [(640, 480), (1280, 720), (1920, 1080)] {
        let image = gradient_image(width, height);

        group.bench_with_input(
            BenchmarkId::new("to_tensor", format!("{}x{}", width, height)),
            &image,
            |b, image| b.iter(|| preprocessor.preprocess(black_box(image)).unwrap()),
        );
    }

    group.finish();
}

fn benchmark_postprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("postprocessing");
    let postprocessor = PostProcessor::new();
    let bounds = ImageBounds {
        width: 1280,
        height: 720,
    };

    for num_detections in [0, 10, 50, 100] {
        let output = create_mock_output(100, num_detections);

        group.bench_with_input(
            BenchmarkId::new("parse_detections", num_detections),
            &output,
            |b, output| {
                b.iter(|| {
                    postprocessor
                        .parse_detections(black_box(output), black_box(0.5), bounds)
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_preprocessing, benchmark_postprocessing);
criterion_main!(benches);
