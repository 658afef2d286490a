use crate::backend::InferenceOutput;
use crate::detection::DetectionRecord;
use crate::errors::InferenceError;
use crate::labels;

/// Pixel dimensions of the image the detector saw.
#[derive(Debug, Clone, Copy)]
pub struct ImageBounds {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PostProcessor;

impl PostProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Keep every candidate whose score reaches `threshold`, in model order.
    #[tracing::instrument(name = "postprocess", skip(self, output), fields(candidates = output.len()))]
    pub fn parse_detections(
        &self,
        output: &InferenceOutput,
        threshold: f32,
        bounds: ImageBounds,
    ) -> Result<Vec<DetectionRecord>, InferenceError> {
        let num_candidates = output.scores.len();

        if output.labels.len() != num_candidates {
            return Err(InferenceError::OutputShape(format!(
                "{} scores but {} labels",
                num_candidates,
                output.labels.len()
            )));
        }
        if output.boxes.len() != num_candidates * 4 {
            return Err(InferenceError::OutputShape(format!(
                "{} scores but {} box coordinates (expected {})",
                num_candidates,
                output.boxes.len(),
                num_candidates * 4
            )));
        }

        let boxes: Vec<f32> = output.boxes.iter().copied().collect();
        let max_x = bounds.width as f32;
        let max_y = bounds.height as f32;

        let mut detections = Vec::new();

        for ((coords, &label), &score) in boxes
            .chunks_exact(4)
            .zip(output.labels.iter())
            .zip(output.scores.iter())
        {
            if score.is_nan() || score < threshold {
                continue;
            }

            let class_name =
                labels::class_name(label).ok_or(InferenceError::UnknownClass(label))?;

            detections.push(DetectionRecord {
                class_name: class_name.to_string(),
                confidence: score,
                bbox: [
                    coords[0].clamp(0.0, max_x),
                    coords[1].clamp(0.0, max_y),
                    coords[2].clamp(0.0, max_x),
                    coords[3].clamp(0.0, max_y),
                ],
            });
        }

        tracing::debug!(
            candidates = num_candidates,
            kept = detections.len(),
            threshold,
            "Filtered detections"
        );

        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    const BOUNDS: ImageBounds = ImageBounds {
        width: 640,
        height: 480,
    };

    /// Helper to build `[N, 4]` boxes, `[N]` labels and `[N]` scores
    fn create_test_output(candidates: Vec<([f32; 4], i64, f32)>) -> InferenceOutput {
        let n = candidates.len();
        let mut boxes = Vec::with_capacity(n * 4);
        let mut labels = Vec::with_capacity(n);
        let mut scores = Vec::with_capacity(n);
        for (bbox, label, score) in candidates {
            boxes.extend_from_slice(&bbox);
            labels.push(label);
            scores.push(score);
        }

        InferenceOutput {
            boxes: Array::from_shape_vec(IxDyn(&[n, 4]), boxes).unwrap(),
            labels: Array::from_shape_vec(IxDyn(&[n]), labels).unwrap(),
            scores: Array::from_shape_vec(IxDyn(&[n]), scores).unwrap(),
        }
    }

    fn mixed_output() -> InferenceOutput {
        create_test_output(vec![
            ([10.0, 10.0, 50.0, 50.0], 3, 0.95),
            ([60.0, 60.0, 120.0, 140.0], 5, 0.50),
            ([200.0, 100.0, 260.0, 180.0], 1, 0.49),
            ([300.0, 200.0, 400.0, 300.0], 8, 0.0),
        ])
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let detections = PostProcessor::new()
            .parse_detections(&mixed_output(), 0.5, BOUNDS)
            .unwrap();

        assert_eq!(detections.len(), 2, "Should keep scores >= 0.5");
        assert_eq!(detections[0].class_name, "good apple");
        assert_eq!(detections[1].class_name, "good banana");
        assert_eq!(detections[1].confidence, 0.5, "Boundary case: 0.5 included");
    }

    #[test]
    fn test_threshold_above_one_returns_nothing() {
        let detections = PostProcessor::new()
            .parse_detections(&mixed_output(), 1.1, BOUNDS)
            .unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_zero_threshold_keeps_every_candidate() {
        let output = mixed_output();
        let detections = PostProcessor::new()
            .parse_detections(&output, 0.0, BOUNDS)
            .unwrap();
        assert_eq!(detections.len(), output.len());
    }

    #[test]
    fn test_model_order_is_preserved() {
        let output = create_test_output(vec![
            ([0.0, 0.0, 5.0, 5.0], 7, 0.6),
            ([0.0, 0.0, 5.0, 5.0], 2, 0.9),
            ([0.0, 0.0, 5.0, 5.0], 4, 0.7),
        ]);
        let detections = PostProcessor::new()
            .parse_detections(&output, 0.0, BOUNDS)
            .unwrap();

        let names: Vec<_> = detections.iter().map(|d| d.class_name.as_str()).collect();
        assert_eq!(names, ["unripe apple", "bad banana", "good apple 1"]);
    }

    #[test]
    fn test_records_respect_threshold_and_label_set() {
        let candidates = (0..27)
            .map(|i| {
                let x = i as f32 * 10.0;
                ([x, x, x + 8.0, x + 8.0], (i % 9) as i64, i as f32 / 26.0)
            })
            .collect();
        let output = create_test_output(candidates);
        let threshold = 0.35;

        let detections = PostProcessor::new()
            .parse_detections(&output, threshold, BOUNDS)
            .unwrap();

        assert!(!detections.is_empty());
        for det in &detections {
            assert!(det.confidence >= threshold && det.confidence <= 1.0);
            assert!(labels::CLASS_NAMES.contains(&det.class_name.as_str()));
        }
    }

    #[test]
    fn test_coordinates_clamped_to_image_bounds() {
        let output = create_test_output(vec![
            ([-12.0, -3.0, 50.0, 50.0], 0, 0.9),
            ([600.0, 400.0, 700.0, 520.0], 0, 0.9),
        ]);
        let detections = PostProcessor::new()
            .parse_detections(&output, 0.5, BOUNDS)
            .unwrap();

        assert_eq!(detections[0].x1(), 0.0, "Negative x1 should be clamped to 0");
        assert_eq!(detections[0].y1(), 0.0, "Negative y1 should be clamped to 0");
        assert_eq!(detections[1].x2(), 640.0, "x2 exceeding width should be clamped");
        assert_eq!(detections[1].y2(), 480.0, "y2 exceeding height should be clamped");
    }

    #[test]
    fn test_batched_output_layout_is_accepted() {
        let output = InferenceOutput {
            boxes: Array::from_shape_vec(IxDyn(&[1, 1, 4]), vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
            labels: Array::from_shape_vec(IxDyn(&[1, 1]), vec![6]).unwrap(),
            scores: Array::from_shape_vec(IxDyn(&[1, 1]), vec![0.8]).unwrap(),
        };
        let detections = PostProcessor::new()
            .parse_detections(&output, 0.5, BOUNDS)
            .unwrap();

        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].class_name, "good banana 1");
        assert_eq!(detections[0].bbox, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let output = InferenceOutput {
            boxes: Array::from_shape_vec(IxDyn(&[2, 4]), vec![0.0; 8]).unwrap(),
            labels: Array::from_shape_vec(IxDyn(&[1]), vec![0]).unwrap(),
            scores: Array::from_shape_vec(IxDyn(&[2]), vec![0.9, 0.9]).unwrap(),
        };
        let result = PostProcessor::new().parse_detections(&output, 0.5, BOUNDS);
        assert!(matches!(result, Err(InferenceError::OutputShape(_))));

        let output = InferenceOutput {
            boxes: Array::from_shape_vec(IxDyn(&[1, 3]), vec![0.0; 3]).unwrap(),
            labels: Array::from_shape_vec(IxDyn(&[1]), vec![0]).unwrap(),
            scores: Array::from_shape_vec(IxDyn(&[1]), vec![0.9]).unwrap(),
        };
        let result = PostProcessor::new().parse_detections(&output, 0.5, BOUNDS);
        assert!(matches!(result, Err(InferenceError::OutputShape(_))));
    }

    #[test]
    fn test_unknown_class_id_is_an_error() {
        let output = create_test_output(vec![([0.0, 0.0, 1.0, 1.0], 9, 0.99)]);
        let result = PostProcessor::new().parse_detections(&output, 0.5, BOUNDS);
        assert!(matches!(result, Err(InferenceError::UnknownClass(9))));
    }

    #[test]
    fn test_unknown_class_below_threshold_is_ignored() {
        let output = create_test_output(vec![([0.0, 0.0, 1.0, 1.0], 42, 0.1)]);
        let detections = PostProcessor::new()
            .parse_detections(&output, 0.5, BOUNDS)
            .unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let output = create_test_output(vec![]);
        let detections = PostProcessor::new()
            .parse_detections(&output, 0.0, BOUNDS)
            .unwrap();
        assert_eq!(detections.len(), 0, "Empty input should return no detections");
    }
}
