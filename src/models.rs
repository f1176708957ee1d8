use serde::{Deserialize, Serialize};

/// Bounding box in pixel units relative to the original image.
///
/// Coordinates follow the backend's convention: `(left, top)` is the
/// top-left corner, and the far corner is `(left + width, top + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Returns the box as `(x, y, w, h)` integer pixels, clamped to an
    /// image of the given dimensions. Boxes fully outside the image
    /// collapse to a zero-sized rectangle at the clamped corner.
    pub fn clamped_xywh(&self, img_width: u32, img_height: u32) -> (i32, i32, u32, u32) {
        let max_x = img_width as f32;
        let max_y = img_height as f32;
        let x1 = self.left.clamp(0.0, max_x);
        let y1 = self.top.clamp(0.0, max_y);
        let x2 = self.right().clamp(0.0, max_x);
        let y2 = self.bottom().clamp(0.0, max_y);
        (
            x1.round() as i32,
            y1.round() as i32,
            (x2 - x1).round().max(0.0) as u32,
            (y2 - y1).round().max(0.0) as u32,
        )
    }
}

/// One recognized object instance: a box, a category label, and a
/// confidence score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub category: String,
    pub score: f32,
}

impl Detection {
    pub fn new(bounding_box: BoundingBox, category: impl Into<String>, score: f32) -> Self {
        Self {
            bounding_box,
            category: category.into(),
            score,
        }
    }

    /// Overlay label text, e.g. `dog: 0.91`.
    pub fn label(&self) -> String {
        format!("{}: {:.2}", self.category, self.score)
    }
}

/// Normalized outcome of one inference call.
///
/// Detections keep the order the backend returned them in; callers must
/// not assume they are sorted by score.
#[derive(Debug, Clone)]
pub struct InferenceResult {
    pub success: bool,
    /// Raw response body, kept on success so the UI can show it verbatim.
    pub raw_response: Option<serde_json::Value>,
    pub detections: Vec<Detection>,
}

impl InferenceResult {
    pub fn ok(raw_response: serde_json::Value, detections: Vec<Detection>) -> Self {
        Self {
            success: true,
            raw_response: Some(raw_response),
            detections,
        }
    }

    /// Result for a non-200 response. The body is dropped.
    pub fn failed() -> Self {
        Self {
            success: false,
            raw_response: None,
            detections: Vec::new(),
        }
    }
}
