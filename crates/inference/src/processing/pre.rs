use common::span;
use image::RgbImage;
use ndarray::{Array, IxDyn};

/// Converts decoded images into the detector's input layout:
/// channel-first `[3, H, W]`, values scaled to `[0, 1]`.
///
/// No resizing happens here; the exported detector rescales internally and
/// reports boxes in the coordinates of the tensor it was given.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreProcessor;

impl PreProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn preprocess(&self, image: &RgbImage) -> anyhow::Result<Array<f32, IxDyn>> {
        let _s = span!("preprocess");

        let width = image.width() as usize;
        let height = image.height() as usize;

        tracing::trace!(width, height, "Preprocessing image");

        if width == 0 || height == 0 {
            anyhow::bail!("cannot run detection on an empty {}x{} image", width, height);
        }

        let spatial = width * height;
        let mut output = vec![0.0f32; 3 * spatial];

        for (i, px) in image.as_raw().chunks_exact(3).enumerate() {
            output[i] = px[0] as f32 / 255.0;
            output[i + spatial] = px[1] as f32 / 255.0;
            output[i + 2 * spatial] = px[2] as f32 / 255.0;
        }

        Ok(Array::from_shape_vec(IxDyn(&[3, height, width]), output)?)
    }
}
