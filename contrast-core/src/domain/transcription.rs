use serde::{Deserialize, Serialize};

use crate::domain::source::MediaSource;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub audio: MediaSource,
}

impl TranscriptionRequest {
    pub fn new(audio: impl Into<MediaSource>) -> Self {
        Self {
            audio: audio.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptionResponse {
    pub text: String,
}
