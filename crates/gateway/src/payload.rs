//! JSON bodies of `POST /detect`.

use crate::errors::ApiError;
use inference::DetectionRecord;
use serde::{Deserialize, Deserializer, Serialize};

/// Request body. Fields are optional here so that a missing field is
/// reported by [`DetectRequest`]'s accessors with a readable message.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub image: Option<String>,

    /// `None` only when the key is absent; an explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub threshold: Option<ThresholdValue>,
}

/// Thresholds arrive either as numbers or as numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ThresholdValue {
    Number(f64),
    Text(String),
    Null,
}

fn present<'de, D>(deserializer: D) -> Result<Option<ThresholdValue>, D::Error>
where
    D: Deserializer<'de>,
{
    ThresholdValue::deserialize(deserializer).map(Some)
}

impl DetectRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        if body.is_empty() {
            return Err(ApiError::Validation("request body is empty".to_string()));
        }
        serde_json::from_slice(body)
            .map_err(|e| ApiError::Validation(format!("malformed JSON body: {}", e)))
    }

    /// The requested threshold, or `default` when absent.
    pub fn threshold(&self, default: f32) -> Result<f32, ApiError> {
        let value = match &self.threshold {
            None => return Ok(default),
            Some(ThresholdValue::Number(n)) => *n,
            Some(ThresholdValue::Text(s)) => s.trim().parse::<f64>().map_err(|_| {
                ApiError::Validation(format!("threshold must be a number, got {:?}", s))
            })?,
            Some(ThresholdValue::Null) => {
                return Err(ApiError::Validation(
                    "threshold must be a number, got null".to_string(),
                ));
            }
        };

        if !value.is_finite() {
            return Err(ApiError::Validation(
                "threshold must be a finite number".to_string(),
            ));
        }
        // Out-of-range values stay meaningful: above 1 nothing passes, below 0 everything does.
        Ok(value.clamp(f32::MIN as f64, f32::MAX as f64) as f32)
    }

    pub fn into_image(self) -> Result<String, ApiError> {
        self.image
            .ok_or_else(|| ApiError::Validation("missing required field 'image'".to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detections: Option<Vec<DetectionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectResponse {
    pub fn success(image: String, detections: Vec<DetectionRecord>) -> Self {
        Self {
            success: true,
            image: Some(image),
            detections: Some(detections),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            image: None,
            detections: None,
            error: Some(error.into()),
        }
    }
}
