use contrast_core::{Error, Result};

/// Alignment counts between reference and prediction word sequences,
/// derived from a minimal-edit alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordAlignment {
    pub hits: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
    pub reference_words: usize,
    pub prediction_words: usize,
}

impl WordAlignment {
    fn edits(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }
}

/// Aligns the two word sequences with a standard edit-distance table and
/// backtracks to count hits, substitutions, deletions and insertions.
pub fn align_words(reference: &str, prediction: &str) -> WordAlignment {
    let r: Vec<&str> = reference.split_whitespace().collect();
    let h: Vec<&str> = prediction.split_whitespace().collect();

    // dp[i][j] = edits to turn r[..i] into h[..j]
    let mut dp = vec![vec![0usize; h.len() + 1]; r.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=h.len() {
        dp[0][j] = j;
    }
    for i in 1..=r.len() {
        for j in 1..=h.len() {
            let substitution_cost = usize::from(r[i - 1] != h[j - 1]);
            dp[i][j] = (dp[i - 1][j - 1] + substitution_cost)
                .min(dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1);
        }
    }

    let mut hits = 0;
    let mut substitutions = 0;
    let mut deletions = 0;
    let mut insertions = 0;
    let (mut i, mut j) = (r.len(), h.len());
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && r[i - 1] == h[j - 1] && dp[i][j] == dp[i - 1][j - 1] {
            hits += 1;
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && dp[i][j] == dp[i - 1][j - 1] + 1 {
            substitutions += 1;
            i -= 1;
            j -= 1;
        } else if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            deletions += 1;
            i -= 1;
        } else {
            insertions += 1;
            j -= 1;
        }
    }

    WordAlignment {
        hits,
        substitutions,
        deletions,
        insertions,
        reference_words: r.len(),
        prediction_words: h.len(),
    }
}

fn require_reference(alignment: &WordAlignment, metric: &str) -> Result<()> {
    if alignment.reference_words == 0 {
        return Err(Error::Metrics(format!(
            "{metric} requires a non-empty reference"
        )));
    }
    Ok(())
}

/// Word error rate: `(S + D + I) / N` over reference word count `N`.
pub fn word_error_rate(reference: &str, prediction: &str) -> Result<f64> {
    let alignment = align_words(reference, prediction);
    require_reference(&alignment, "word_error_rate")?;
    Ok(alignment.edits() as f64 / alignment.reference_words as f64)
}

/// Match error rate: `(S + D + I) / (H + S + D + I)`.
pub fn match_error_rate(reference: &str, prediction: &str) -> Result<f64> {
    let alignment = align_words(reference, prediction);
    require_reference(&alignment, "match_error_rate")?;
    let denominator = alignment.hits + alignment.edits();
    Ok(alignment.edits() as f64 / denominator as f64)
}

/// Word information preserved: `(H / N) * (H / P)`.
pub fn word_information_preserved(reference: &str, prediction: &str) -> Result<f64> {
    let alignment = align_words(reference, prediction);
    require_reference(&alignment, "word_information_preserved")?;
    if alignment.prediction_words == 0 {
        return Ok(0.0);
    }
    let recall = alignment.hits as f64 / alignment.reference_words as f64;
    let precision = alignment.hits as f64 / alignment.prediction_words as f64;
    Ok(recall * precision)
}

/// Word information lost: `1 - WIP`.
pub fn word_information_lost(reference: &str, prediction: &str) -> Result<f64> {
    Ok(1.0 - word_information_preserved(reference, prediction)?)
}

/// Word recognition rate: `1 - WER`. Can go negative when the prediction
/// inserts more words than the reference holds.
pub fn word_recognition_rate(reference: &str, prediction: &str) -> Result<f64> {
    Ok(1.0 - word_error_rate(reference, prediction)?)
}
