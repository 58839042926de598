use pretty_assertions::assert_eq;

use contrast_core::{
    DocumentReconstruction, DocumentReconstructionResponse, Error, Metric, Ocr, OcrResponse,
    SentimentAnalysis, SentimentAnalysisResponse, Transcription, TranscriptionResponse,
    Translation, TranslationResponse,
};
use contrast_metrics::TaskScorer;

#[test]
fn translation_scoring_reports_bleu_and_chrf() {
    let reference = TranslationResponse {
        text: "the weather is nice today".to_string(),
    };
    let prediction = TranslationResponse {
        text: "the weather is nice today".to_string(),
    };

    let report = Translation::score(&reference, &prediction).unwrap();
    assert_eq!(report.metrics.len(), 2);
    assert_eq!(report.metrics[&Metric::Bleu], 1.0);
    assert_eq!(report.metrics[&Metric::ChrF], 1.0);
    assert_eq!(report.normalized_reference, report.normalized_prediction);
}

#[test]
fn ocr_scoring_normalizes_before_comparing() {
    let reference = OcrResponse {
        all_text: "HELLO, WORLD".to_string(),
        bounding_boxes: vec![],
    };
    let prediction = OcrResponse {
        all_text: "hello world".to_string(),
        bounding_boxes: vec![],
    };

    let report = Ocr::score(&reference, &prediction).unwrap();
    assert_eq!(report.normalized_reference, "hello world");
    assert_eq!(report.normalized_prediction, "hello world");
    assert_eq!(report.metrics[&Metric::CharacterErrorRate], 0.0);
    assert_eq!(report.metrics[&Metric::WordErrorRate], 0.0);
}

#[test]
fn transcription_scoring_reports_full_word_metric_set() {
    let reference = TranscriptionResponse {
        text: "good morning everyone".to_string(),
    };
    let prediction = TranscriptionResponse {
        text: "good morning everybody".to_string(),
    };

    let report = Transcription::score(&reference, &prediction).unwrap();
    let expected = [
        Metric::WordErrorRate,
        Metric::MatchErrorRate,
        Metric::WordInformationLost,
        Metric::WordInformationPreserved,
        Metric::WordRecognitionRate,
        Metric::CharacterErrorRate,
    ];
    for metric in expected {
        assert!(report.metrics.contains_key(&metric), "missing {metric}");
    }
    assert!((report.metrics[&Metric::WordErrorRate] - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn document_reconstruction_scores_markdown_text() {
    let reference = DocumentReconstructionResponse {
        markdown: "# Title\n\nBody text".to_string(),
    };
    let prediction = DocumentReconstructionResponse {
        markdown: "# Title\n\nBody text".to_string(),
    };

    let report = DocumentReconstruction::score(&reference, &prediction).unwrap();
    assert_eq!(report.metrics[&Metric::CharacterErrorRate], 0.0);
}

#[test]
fn sentiment_scoring_uses_absolute_error() {
    let reference = SentimentAnalysisResponse { score: 0.9 };
    let prediction = SentimentAnalysisResponse { score: 0.7 };

    let report = SentimentAnalysis::score(&reference, &prediction).unwrap();
    assert!((report.metrics[&Metric::ScoreAbsoluteError] - 0.2).abs() < 1e-9);
}

#[test]
fn empty_reference_fails_scoring() {
    let reference = TranslationResponse {
        text: "   ".to_string(),
    };
    let prediction = TranslationResponse {
        text: "words".to_string(),
    };

    match Translation::score(&reference, &prediction) {
        Err(Error::Metrics(_)) => {}
        other => panic!("expected Metrics error, got {other:?}"),
    }
}
