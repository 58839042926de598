use serde::{Deserialize, Serialize};

use crate::domain::source::MediaSource;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrRequest {
    pub image: MediaSource,
}

impl OcrRequest {
    pub fn new(image: impl Into<MediaSource>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

/// One recognized text fragment with its polygon in pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrBoundingBox {
    pub text: String,
    pub coordinates: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrResponse {
    /// Concatenated text of the whole image.
    pub all_text: String,
    /// Per-fragment annotations; empty when the vendor reports none.
    pub bounding_boxes: Vec<OcrBoundingBox>,
}
