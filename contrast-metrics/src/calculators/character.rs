use contrast_core::{Error, Result};

use super::levenshtein;

/// Character error rate: character-level edit distance divided by the
/// reference length. Fails on an empty reference.
pub fn character_error_rate(reference: &str, prediction: &str) -> Result<f64> {
    let ref_chars: Vec<char> = reference.chars().collect();
    if ref_chars.is_empty() {
        return Err(Error::Metrics(
            "character_error_rate requires a non-empty reference".to_string(),
        ));
    }
    let pred_chars: Vec<char> = prediction.chars().collect();

    Ok(levenshtein(&ref_chars, &pred_chars) as f64 / ref_chars.len() as f64)
}
