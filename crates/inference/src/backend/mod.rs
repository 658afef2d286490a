use ndarray::{Array, IxDyn};

#[cfg(feature = "ort-backend")]
pub mod ort;

/// The opaque detector: one image tensor in, three parallel outputs back.
pub trait InferenceBackend {
    /// Run inference on a `[3, H, W]` tensor with values in `[0, 1]`.
    fn infer(&mut self, image: &Array<f32, IxDyn>) -> anyhow::Result<InferenceOutput>;
}

pub struct InferenceOutput {
    pub boxes: ndarray::ArrayD<f32>,  // [N, 4] xyxy in input pixels
    pub labels: ndarray::ArrayD<i64>, // [N] class ids
    pub scores: ndarray::ArrayD<f32>, // [N] confidences in [0, 1]
}

impl InferenceOutput {
    /// Number of raw candidates, taken from the score output.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
