use contrast_core::Task;

/// Normalizes text before scoring so vendors are compared on content, not
/// formatting.
///
/// All tasks lowercase and collapse whitespace. Recognition tasks (OCR,
/// transcription, document reconstruction) additionally strip punctuation,
/// since error-rate metrics should not punish a vendor for comma placement.
pub fn normalize_text(text: &str, task: Task) -> String {
    let strip_punctuation = matches!(
        task,
        Task::Ocr | Task::Transcription | Task::DocumentReconstruction
    );

    let lowered = text.to_lowercase();
    let filtered: String = lowered
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                ' '
            } else if strip_punctuation && !c.is_alphanumeric() {
                ' '
            } else {
                c
            }
        })
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
