use crate::{
    backend::{InferenceBackend, InferenceOutput},
    detection::DetectionRecord,
    errors::InferenceError,
    processing::{
        post::{ImageBounds, PostProcessor},
        pre::PreProcessor,
    },
};
use image::RgbImage;
use std::sync::{Mutex, PoisonError};

/// Shared, read-only detection entry point.
///
/// ONNX Runtime sessions need exclusive access to run, so the backend sits
/// behind a mutex. Pre- and post-processing run outside the lock.
///
/// The backend holds no state across calls, so a lock poisoned by a
/// panicking request is taken over by the next one.
pub struct Detector {
    backend: Mutex<Box<dyn InferenceBackend + Send>>,
    preprocessor: PreProcessor,
    postprocessor: PostProcessor,
}

impl Detector {
    pub fn new<B>(backend: B) -> Self
    where
        B: InferenceBackend + Send + 'static,
    {
        Self {
            backend: Mutex::new(Box::new(backend)),
            preprocessor: PreProcessor::new(),
            postprocessor: PostProcessor::new(),
        }
    }

    /// Run the model on `image` and keep detections scoring at least `threshold`.
    pub fn detect(
        &self,
        image: &RgbImage,
        threshold: f32,
    ) -> Result<Vec<DetectionRecord>, InferenceError> {
        let tensor = self.preprocessor.preprocess(image)?;

        let output: InferenceOutput = {
            let _infer_span = tracing::info_span!("model_inference").entered();
            let mut backend = self.backend.lock().unwrap_or_else(PoisonError::into_inner);
            backend.infer(&tensor)?
        };

        let bounds = ImageBounds {
            width: image.width(),
            height: image.height(),
        };

        self.postprocessor
            .parse_detections(&output, threshold, bounds)
    }
}
