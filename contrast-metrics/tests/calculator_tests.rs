use pretty_assertions::assert_eq;
use rstest::rstest;

use contrast_core::{Error, Task};
use contrast_metrics::{
    align_words, bleu, character_error_rate, chr_f, match_error_rate, normalize_text,
    word_error_rate, word_information_lost, word_information_preserved, word_recognition_rate,
};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

// ===== normalization =====

#[rstest]
#[case(Task::Ocr, "Hello,  WORLD!!", "hello world")]
#[case(Task::Transcription, "It's\nme.", "it s me")]
#[case(Task::Translation, "Bonjour,  Monde", "bonjour, monde")]
fn normalize_text_per_task(#[case] task: Task, #[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_text(input, task), expected);
}

#[test]
fn normalize_text_is_idempotent() {
    let once = normalize_text("  The QUICK   brown\tfox. ", Task::Ocr);
    assert_eq!(normalize_text(&once, Task::Ocr), once);
}

// ===== character error rate =====

#[test]
fn cer_counts_character_edits() {
    assert_close(character_error_rate("abc", "abd").unwrap(), 1.0 / 3.0);
    assert_close(character_error_rate("hello", "hello").unwrap(), 0.0);
}

#[test]
fn cer_rejects_empty_reference() {
    match character_error_rate("", "anything") {
        Err(Error::Metrics(_)) => {}
        other => panic!("expected Metrics error, got {other:?}"),
    }
}

// ===== word-level metrics =====

#[test]
fn wer_single_substitution() {
    assert_close(
        word_error_rate("the quick brown fox", "the quick brown dog").unwrap(),
        0.25,
    );
}

#[test]
fn word_alignment_counts() {
    // a [x] b c [d]: two insertions, three hits
    let alignment = align_words("a b c", "a x b c d");
    assert_eq!(alignment.hits, 3);
    assert_eq!(alignment.substitutions, 0);
    assert_eq!(alignment.deletions, 0);
    assert_eq!(alignment.insertions, 2);

    assert_close(word_error_rate("a b c", "a x b c d").unwrap(), 2.0 / 3.0);
    assert_close(match_error_rate("a b c", "a x b c d").unwrap(), 2.0 / 5.0);
    assert_close(
        word_information_preserved("a b c", "a x b c d").unwrap(),
        0.6,
    );
    assert_close(word_information_lost("a b c", "a x b c d").unwrap(), 0.4);
    assert_close(
        word_recognition_rate("a b c", "a x b c d").unwrap(),
        1.0 / 3.0,
    );
}

#[test]
fn word_metrics_perfect_match() {
    let reference = "one two three";
    assert_close(word_error_rate(reference, reference).unwrap(), 0.0);
    assert_close(match_error_rate(reference, reference).unwrap(), 0.0);
    assert_close(word_information_preserved(reference, reference).unwrap(), 1.0);
    assert_close(word_recognition_rate(reference, reference).unwrap(), 1.0);
}

#[test]
fn word_metrics_empty_prediction() {
    assert_close(word_error_rate("a b", "").unwrap(), 1.0);
    assert_close(word_information_preserved("a b", "").unwrap(), 0.0);
}

// ===== bleu =====

#[test]
fn bleu_perfect_match_scores_one() {
    assert_close(bleu("the cat sat on the mat", "the cat sat on the mat").unwrap(), 1.0);
}

#[test]
fn bleu_empty_prediction_scores_zero() {
    assert_close(bleu("the cat", "").unwrap(), 0.0);
}

#[test]
fn bleu_disjoint_scores_zero() {
    assert_close(bleu("aaa bbb", "ccc ddd").unwrap(), 0.0);
}

#[test]
fn bleu_partial_overlap_is_between_zero_and_one() {
    let score = bleu("the cat sat on the mat", "the cat sat on a mat").unwrap();
    assert!(score > 0.0 && score < 1.0, "score was {score}");
}

#[test]
fn bleu_rejects_empty_reference() {
    assert!(matches!(bleu("", "words"), Err(Error::Metrics(_))));
}

// ===== chrf =====

#[test]
fn chrf_perfect_match_scores_one() {
    assert_close(chr_f("translation", "translation").unwrap(), 1.0);
}

#[test]
fn chrf_empty_prediction_scores_zero() {
    assert_close(chr_f("text", "").unwrap(), 0.0);
}

#[test]
fn chrf_orders_by_similarity() {
    let close = chr_f("translation", "translaton").unwrap();
    let far = chr_f("translation", "zzzzz").unwrap();
    assert!(close > far, "close={close} far={far}");
}
