use std::collections::HashMap;

use contrast_core::{Error, Result};

const MAX_ORDER: usize = 4;

fn ngram_counts<'a>(words: &'a [&'a str], n: usize) -> HashMap<&'a [&'a str], usize> {
    let mut counts: HashMap<&[&str], usize> = HashMap::new();
    if words.len() >= n {
        for window in words.windows(n) {
            *counts.entry(window).or_default() += 1;
        }
    }
    counts
}

/// Sentence-level BLEU with up to 4-grams, add-one smoothing on the
/// higher orders and the usual brevity penalty. Fails on an empty
/// reference; an empty prediction scores 0.
pub fn bleu(reference: &str, prediction: &str) -> Result<f64> {
    let ref_words: Vec<&str> = reference.split_whitespace().collect();
    if ref_words.is_empty() {
        return Err(Error::Metrics("bleu requires a non-empty reference".to_string()));
    }
    let pred_words: Vec<&str> = prediction.split_whitespace().collect();
    if pred_words.is_empty() {
        return Ok(0.0);
    }

    let mut log_precision_sum = 0.0;
    for n in 1..=MAX_ORDER {
        let ref_counts = ngram_counts(&ref_words, n);
        let pred_counts = ngram_counts(&pred_words, n);

        let total: usize = pred_counts.values().sum();
        let matched: usize = pred_counts
            .iter()
            .map(|(ngram, count)| (*count).min(ref_counts.get(ngram).copied().unwrap_or(0)))
            .sum();

        let precision = if n == 1 {
            if matched == 0 {
                return Ok(0.0);
            }
            matched as f64 / total as f64
        } else {
            // add-one smoothing; also covers orders longer than the sentence
            (matched + 1) as f64 / (total + 1) as f64
        };
        log_precision_sum += precision.ln();
    }

    let brevity_penalty = if pred_words.len() >= ref_words.len() {
        1.0
    } else {
        (1.0 - ref_words.len() as f64 / pred_words.len() as f64).exp()
    };

    Ok(brevity_penalty * (log_precision_sum / MAX_ORDER as f64).exp())
}
