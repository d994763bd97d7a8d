use crate::models::Label;
use crate::validation::FieldValidator;

/// Lines scanned after a label before giving up on it
pub const DEFAULT_WINDOW: usize = 3;

/// Label-anchored search over OCR lines.
///
/// OCR splits a caption and its value into neighbouring detections, often
/// with a few stray fragments in between, so the value is looked for in the
/// `window` lines following the caption.
pub struct CandidateScanner;

impl CandidateScanner {
    fn is_label_line(labels: &[Label], line: &str) -> bool {
        let normalized = line.trim().to_uppercase();
        labels.iter().any(|label| label.matches(&normalized))
    }

    /// Index of the first line carrying any of `labels`
    pub fn find_label_line<S: AsRef<str>>(labels: &[Label], lines: &[S]) -> Option<usize> {
        lines
            .iter()
            .position(|line| Self::is_label_line(labels, line.as_ref()))
    }

    fn scan_window<S: AsRef<str>>(
        lines: &[S],
        index: usize,
        validator: FieldValidator,
        window: usize,
    ) -> Option<String> {
        lines
            .iter()
            .skip(index + 1)
            .take(window)
            .find_map(|line| validator.accept(line.as_ref()))
    }

    /// Value following the first label line, or an empty string.
    ///
    /// Only the first label line is considered: when its window holds no
    /// acceptable value the search ends there, even if the same caption
    /// appears again further down.
    pub fn find_value<S: AsRef<str>>(
        labels: &[Label],
        lines: &[S],
        validator: FieldValidator,
        window: usize,
    ) -> String {
        let Some(index) = Self::find_label_line(labels, lines) else {
            return String::new();
        };

        Self::scan_window(lines, index, validator, window).unwrap_or_default()
    }

    /// Like `find_value`, but an empty window moves the search on to the
    /// next label line instead of ending it
    pub fn find_value_any_label<S: AsRef<str>>(
        labels: &[Label],
        lines: &[S],
        validator: FieldValidator,
        window: usize,
    ) -> String {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| Self::is_label_line(labels, line.as_ref()))
            .find_map(|(index, _)| Self::scan_window(lines, index, validator, window))
            .unwrap_or_default()
    }

    /// First acceptable value anywhere in the document, ignoring labels
    pub fn find_unanchored<S: AsRef<str>>(lines: &[S], validator: FieldValidator) -> String {
        lines
            .iter()
            .find_map(|line| validator.accept(line.as_ref()))
            .unwrap_or_default()
    }
}
