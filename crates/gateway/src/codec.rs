//! Data URL <-> raster conversion for request and response images.

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbImage, codecs::jpeg::JpegEncoder};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("image is not a data URL: expected 'data:<mime>;base64,' prefix")]
    MissingPrefix,

    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported or corrupt image: {0}")]
    Image(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Decode a `data:<mime>;base64,<payload>` string into an RGB image.
///
/// Everything up to the first comma is treated as the prefix; the payload
/// may contain line breaks.
pub fn decode_data_url(data_url: &str) -> Result<RgbImage, CodecError> {
    let (_prefix, payload) = data_url.split_once(',').ok_or(CodecError::MissingPrefix)?;

    let bytes = if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = payload.split_ascii_whitespace().collect();
        STANDARD.decode(compact)?
    } else {
        STANDARD.decode(payload)?
    };

    let image = image::load_from_memory(&bytes).map_err(CodecError::Image)?;

    tracing::trace!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        encoded_bytes = bytes.len(),
        "Decoded request image"
    );

    Ok(image.to_rgb8())
}

/// Encode an RGB image as a base64 data URL in `format`.
///
/// `jpeg_quality` only applies to JPEG output.
pub fn encode_data_url(
    image: &RgbImage,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<String, CodecError> {
    let mut buffer = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            let quality = jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality)
                .encode_image(image)
                .map_err(CodecError::Encode)?;
        }
        other => {
            image
                .write_to(&mut Cursor::new(&mut buffer), other)
                .map_err(CodecError::Encode)?;
        }
    }

    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(&buffer)
    ))
}
