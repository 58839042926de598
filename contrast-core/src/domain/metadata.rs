use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::provider::Provider;
use crate::domain::task::Task;

/// Quality metrics a reference-based scoring pass can produce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    // word-level metrics
    WordErrorRate,
    MatchErrorRate,
    WordInformationLost,
    WordInformationPreserved,
    WordRecognitionRate,

    // character-level metrics
    CharacterErrorRate,

    // translation metrics
    Bleu,
    ChrF,

    // scalar-response metrics
    ScoreAbsoluteError,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::WordErrorRate => "word_error_rate",
            Metric::MatchErrorRate => "match_error_rate",
            Metric::WordInformationLost => "word_information_lost",
            Metric::WordInformationPreserved => "word_information_preserved",
            Metric::WordRecognitionRate => "word_recognition_rate",
            Metric::CharacterErrorRate => "character_error_rate",
            Metric::Bleu => "bleu",
            Metric::ChrF => "chr_f",
            Metric::ScoreAbsoluteError => "score_absolute_error",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one reference-based scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsReport {
    pub metrics: BTreeMap<Metric, f64>,
    pub normalized_reference: String,
    pub normalized_prediction: String,
}

/// Per-call record returned alongside every response.
///
/// Created fresh for each `request`/`evaluate` call and owned by the
/// caller; the session keeps nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskMetadata {
    pub task: Task,
    pub provider: Provider,
    /// Wall-clock duration of the handler call only.
    pub latency: Duration,
    pub recorded_at: DateTime<Utc>,
    /// Present only when the caller supplied a reference and scoring
    /// succeeded.
    pub metrics: Option<MetricsReport>,
}

impl TaskMetadata {
    pub fn new(task: Task, provider: Provider, latency: Duration) -> Self {
        Self {
            task,
            provider,
            latency,
            recorded_at: Utc::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsReport) -> Self {
        self.metrics = Some(metrics);
        self
    }
}
