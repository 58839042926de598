pub mod bleu;
pub mod character;
pub mod chrf;
pub mod word;

pub use bleu::*;
pub use character::*;
pub use chrf::*;
pub use word::*;

/// Levenshtein distance over arbitrary token slices; shared by the
/// character- and word-level error rates.
pub(crate) fn levenshtein<T: PartialEq>(reference: &[T], prediction: &[T]) -> usize {
    if reference.is_empty() {
        return prediction.len();
    }
    if prediction.is_empty() {
        return reference.len();
    }

    let mut previous: Vec<usize> = (0..=prediction.len()).collect();
    let mut current = vec![0usize; prediction.len() + 1];

    for (i, ref_token) in reference.iter().enumerate() {
        current[0] = i + 1;
        for (j, pred_token) in prediction.iter().enumerate() {
            let substitution_cost = usize::from(ref_token != pred_token);
            current[j + 1] = (previous[j] + substitution_cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[prediction.len()]
}

#[cfg(test)]
mod tests {
    use super::levenshtein;

    #[test]
    fn levenshtein_known_distances() {
        let a: Vec<char> = "kitten".chars().collect();
        let b: Vec<char> = "sitting".chars().collect();
        assert_eq!(levenshtein(&a, &b), 3);

        let empty: Vec<char> = vec![];
        assert_eq!(levenshtein(&empty, &a), 6);
        assert_eq!(levenshtein(&a, &a), 0);
    }
}
