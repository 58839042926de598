use serde::{Deserialize, Serialize};

use crate::domain::source::MediaSource;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentReconstructionRequest {
    pub document: MediaSource,
}

impl DocumentReconstructionRequest {
    pub fn new(document: impl Into<MediaSource>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

/// The reconstructed document as markdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentReconstructionResponse {
    pub markdown: String,
}
