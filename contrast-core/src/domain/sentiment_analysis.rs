use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentAnalysisRequest {
    pub text: String,
}

impl SentimentAnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Sentiment polarity in `[-1.0, 1.0]`; positive means positive sentiment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SentimentAnalysisResponse {
    pub score: f64,
}
