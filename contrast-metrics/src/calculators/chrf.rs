use std::collections::HashMap;

use contrast_core::{Error, Result};

const MAX_ORDER: usize = 6;
const BETA: f64 = 2.0;

fn char_ngram_counts(chars: &[char], n: usize) -> HashMap<&[char], usize> {
    let mut counts: HashMap<&[char], usize> = HashMap::new();
    if chars.len() >= n {
        for window in chars.windows(n) {
            *counts.entry(window).or_default() += 1;
        }
    }
    counts
}

/// chrF: character n-gram F-score (n up to 6, recall-weighted with
/// beta = 2), averaged over the orders that occur in either string.
/// Whitespace is ignored, matching the usual formulation.
pub fn chr_f(reference: &str, prediction: &str) -> Result<f64> {
    let ref_chars: Vec<char> = reference.chars().filter(|c| !c.is_whitespace()).collect();
    if ref_chars.is_empty() {
        return Err(Error::Metrics("chr_f requires a non-empty reference".to_string()));
    }
    let pred_chars: Vec<char> = prediction.chars().filter(|c| !c.is_whitespace()).collect();
    if pred_chars.is_empty() {
        return Ok(0.0);
    }

    let beta_squared = BETA * BETA;
    let mut f_score_sum = 0.0;
    let mut orders = 0;

    for n in 1..=MAX_ORDER {
        let ref_counts = char_ngram_counts(&ref_chars, n);
        let pred_counts = char_ngram_counts(&pred_chars, n);

        let ref_total: usize = ref_counts.values().sum();
        let pred_total: usize = pred_counts.values().sum();
        if ref_total == 0 && pred_total == 0 {
            continue;
        }
        orders += 1;

        let matched: usize = pred_counts
            .iter()
            .map(|(ngram, count)| (*count).min(ref_counts.get(ngram).copied().unwrap_or(0)))
            .sum();

        if matched == 0 {
            continue;
        }
        let precision = matched as f64 / pred_total as f64;
        let recall = matched as f64 / ref_total as f64;
        f_score_sum +=
            (1.0 + beta_squared) * precision * recall / (beta_squared * precision + recall);
    }

    if orders == 0 {
        return Ok(0.0);
    }
    Ok(f_score_sum / orders as f64)
}
