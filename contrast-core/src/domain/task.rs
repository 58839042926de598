use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::document_reconstruction::{
    DocumentReconstructionRequest, DocumentReconstructionResponse,
};
use crate::domain::ocr::{OcrRequest, OcrResponse};
use crate::domain::sentiment_analysis::{SentimentAnalysisRequest, SentimentAnalysisResponse};
use crate::domain::transcription::{TranscriptionRequest, TranscriptionResponse};
use crate::domain::translation::{TranslationRequest, TranslationResponse};

/// The closed set of capability domains the library can dispatch.
///
/// Each task fixes one request/response shape pair; see the matching
/// [`TaskKind`] marker types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    DocumentReconstruction,
    Ocr,
    SentimentAnalysis,
    Transcription,
    Translation,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::DocumentReconstruction,
        Task::Ocr,
        Task::SentimentAnalysis,
        Task::Transcription,
        Task::Translation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::DocumentReconstruction => "document_reconstruction",
            Task::Ocr => "ocr",
            Task::SentimentAnalysis => "sentiment_analysis",
            Task::Transcription => "transcription",
            Task::Translation => "translation",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::SentimentAnalysis {}
    impl Sealed for super::Translation {}
    impl Sealed for super::Ocr {}
    impl Sealed for super::Transcription {}
    impl Sealed for super::DocumentReconstruction {}
}

/// Compile-time binding from a task to its request/response shape pair.
///
/// The trait is sealed: the task set is closed, and the per-task marker
/// types below are the only implementors. Sessions, handlers and the
/// registry are generic over a `TaskKind` so routing mistakes between
/// task shapes are unrepresentable.
pub trait TaskKind: sealed::Sealed + Send + Sync + 'static {
    const TASK: Task;

    type Request: fmt::Debug + Send + Sync;
    type Response: fmt::Debug + Clone + Send + Sync;
}

/// Marker for [`Task::SentimentAnalysis`].
pub struct SentimentAnalysis;

impl TaskKind for SentimentAnalysis {
    const TASK: Task = Task::SentimentAnalysis;

    type Request = SentimentAnalysisRequest;
    type Response = SentimentAnalysisResponse;
}

/// Marker for [`Task::Translation`].
pub struct Translation;

impl TaskKind for Translation {
    const TASK: Task = Task::Translation;

    type Request = TranslationRequest;
    type Response = TranslationResponse;
}

/// Marker for [`Task::Ocr`].
pub struct Ocr;

impl TaskKind for Ocr {
    const TASK: Task = Task::Ocr;

    type Request = OcrRequest;
    type Response = OcrResponse;
}

/// Marker for [`Task::Transcription`].
pub struct Transcription;

impl TaskKind for Transcription {
    const TASK: Task = Task::Transcription;

    type Request = TranscriptionRequest;
    type Response = TranscriptionResponse;
}

/// Marker for [`Task::DocumentReconstruction`].
pub struct DocumentReconstruction;

impl TaskKind for DocumentReconstruction {
    const TASK: Task = Task::DocumentReconstruction;

    type Request = DocumentReconstructionRequest;
    type Response = DocumentReconstructionResponse;
}
