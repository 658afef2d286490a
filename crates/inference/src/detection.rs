use serde::Serialize;

/// A detection that survived the confidence threshold.
///
/// `bbox` is `[x1, y1, x2, y2]` in pixel coordinates of the input image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionRecord {
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f32,
    pub bbox: [f32; 4],
}

impl DetectionRecord {
    pub fn x1(&self) -> f32 {
        self.bbox[0]
    }

    pub fn y1(&self) -> f32 {
        self.bbox[1]
    }

    pub fn x2(&self) -> f32 {
        self.bbox[2]
    }

    pub fn y2(&self) -> f32 {
        self.bbox[3]
    }

    /// Text drawn on the label tag, e.g. `good apple (0.93)`.
    pub fn label(&self) -> String {
        format!("{} ({:.2})", self.class_name, self.confidence)
    }
}
