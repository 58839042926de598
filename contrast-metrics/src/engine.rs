use std::collections::BTreeMap;

use contrast_core::{
    DocumentReconstruction, Error, Metric, MetricsReport, Ocr, Result, SentimentAnalysis, Task,
    TaskKind, Transcription, Translation,
};

use crate::calculators::{
    bleu, character_error_rate, chr_f, match_error_rate, word_error_rate, word_information_lost,
    word_information_preserved, word_recognition_rate,
};
use crate::normalize::normalize_text;

/// Computes one text metric over already-normalized strings.
pub fn compute(metric: Metric, reference: &str, prediction: &str) -> Result<f64> {
    match metric {
        Metric::WordErrorRate => word_error_rate(reference, prediction),
        Metric::MatchErrorRate => match_error_rate(reference, prediction),
        Metric::WordInformationLost => word_information_lost(reference, prediction),
        Metric::WordInformationPreserved => word_information_preserved(reference, prediction),
        Metric::WordRecognitionRate => word_recognition_rate(reference, prediction),
        Metric::CharacterErrorRate => character_error_rate(reference, prediction),
        Metric::Bleu => bleu(reference, prediction),
        Metric::ChrF => chr_f(reference, prediction),
        Metric::ScoreAbsoluteError => Err(Error::Metrics(
            "score_absolute_error is only defined for scalar responses".to_string(),
        )),
    }
}

fn text_report(
    task: Task,
    metrics: &[Metric],
    reference: &str,
    prediction: &str,
) -> Result<MetricsReport> {
    let normalized_reference = normalize_text(reference, task);
    let normalized_prediction = normalize_text(prediction, task);

    let mut scores = BTreeMap::new();
    for &metric in metrics {
        scores.insert(
            metric,
            compute(metric, &normalized_reference, &normalized_prediction)?,
        );
    }

    Ok(MetricsReport {
        metrics: scores,
        normalized_reference,
        normalized_prediction,
    })
}

/// Reference-based scoring for one task kind.
///
/// Pure: no side effects, no retained state. Callers that treat scoring
/// as optional (the session does) downgrade the error themselves.
pub trait TaskScorer: TaskKind {
    fn score(reference: &Self::Response, prediction: &Self::Response) -> Result<MetricsReport>;
}

impl TaskScorer for Translation {
    fn score(reference: &Self::Response, prediction: &Self::Response) -> Result<MetricsReport> {
        text_report(
            Task::Translation,
            &[Metric::Bleu, Metric::ChrF],
            &reference.text,
            &prediction.text,
        )
    }
}

impl TaskScorer for Ocr {
    fn score(reference: &Self::Response, prediction: &Self::Response) -> Result<MetricsReport> {
        text_report(
            Task::Ocr,
            &[Metric::CharacterErrorRate, Metric::WordErrorRate],
            &reference.all_text,
            &prediction.all_text,
        )
    }
}

impl TaskScorer for Transcription {
    fn score(reference: &Self::Response, prediction: &Self::Response) -> Result<MetricsReport> {
        text_report(
            Task::Transcription,
            &[
                Metric::WordErrorRate,
                Metric::MatchErrorRate,
                Metric::WordInformationLost,
                Metric::WordInformationPreserved,
                Metric::WordRecognitionRate,
                Metric::CharacterErrorRate,
            ],
            &reference.text,
            &prediction.text,
        )
    }
}

impl TaskScorer for DocumentReconstruction {
    fn score(reference: &Self::Response, prediction: &Self::Response) -> Result<MetricsReport> {
        text_report(
            Task::DocumentReconstruction,
            &[Metric::CharacterErrorRate, Metric::WordErrorRate],
            &reference.markdown,
            &prediction.markdown,
        )
    }
}

impl TaskScorer for SentimentAnalysis {
    fn score(reference: &Self::Response, prediction: &Self::Response) -> Result<MetricsReport> {
        let mut metrics = BTreeMap::new();
        metrics.insert(
            Metric::ScoreAbsoluteError,
            (reference.score - prediction.score).abs(),
        );

        Ok(MetricsReport {
            metrics,
            normalized_reference: format!("{:.4}", reference.score),
            normalized_prediction: format!("{:.4}", prediction.score),
        })
    }
}
