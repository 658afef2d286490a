//! The per-request detection pipeline:
//! decode -> infer -> filter -> annotate -> encode.
//!
//! Each stage returns early on failure; nothing is retried and no partial
//! result is ever produced.

use crate::codec::{decode_data_url, encode_data_url};
use crate::errors::ApiError;
use crate::payload::DetectResponse;
use crate::state::AppState;
use common::span;
use image::ImageFormat;

/// Run the whole pipeline synchronously. Call from a blocking context.
pub fn run(state: &AppState, data_url: &str, threshold: f32) -> Result<DetectResponse, ApiError> {
    let image = {
        let _s = span!("decode");
        decode_data_url(data_url)?
    };

    let detections = state.detector.detect(&image, threshold)?;

    let annotated = state.annotator.annotate(&image, &detections);

    let encoded = {
        let _s = span!("encode");
        encode_data_url(&annotated, ImageFormat::Jpeg, state.settings.jpeg_quality)?
    };

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        threshold,
        detections = detections.len(),
        "Detection pipeline finished"
    );

    Ok(DetectResponse::success(encoded, detections))
}
