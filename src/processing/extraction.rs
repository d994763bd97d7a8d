use crate::models::{labels_for, FieldKey, FieldRecord, MergedRecord};
use crate::processing::scanner::{CandidateScanner, DEFAULT_WINDOW};
use crate::validation::FieldValidator;
use log::debug;
use std::thread;

/// Turns the OCR lines of one card side into a validated `FieldRecord`.
///
/// Extraction is pure: it never fails, and anything it cannot read with
/// confidence is left as an empty string.
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor {
    window: usize,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl FieldExtractor {
    pub fn new(window: usize) -> Self {
        FieldExtractor { window }
    }

    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> FieldRecord {
        let mut fields = FieldRecord::new();

        fields.id_number = Self::extract_id_number(lines);
        for key in [
            FieldKey::GivenName,
            FieldKey::Surname,
            FieldKey::MotherName,
            FieldKey::FatherName,
        ] {
            fields.set(key, self.anchored(key, lines));
        }
        fields.birth_date = self.anchored_or_anywhere(FieldKey::BirthDate, lines);
        fields.sex = self.anchored_or_anywhere(FieldKey::Sex, lines);

        Self::post_filter(&mut fields);
        debug!("Extracted fields: {:?}", fields);
        fields
    }

    /// First line whose leading number-shaped run passes the checksum
    fn extract_id_number<S: AsRef<str>>(lines: &[S]) -> String {
        CandidateScanner::find_unanchored(lines, FieldValidator::IdNumber)
    }

    fn anchored<S: AsRef<str>>(&self, key: FieldKey, lines: &[S]) -> String {
        CandidateScanner::find_value(
            labels_for(key),
            lines,
            FieldValidator::for_field(key),
            self.window,
        )
    }

    /// Every label line is tried in turn before falling back to the first
    /// acceptable line anywhere in the document
    fn anchored_or_anywhere<S: AsRef<str>>(&self, key: FieldKey, lines: &[S]) -> String {
        let value = CandidateScanner::find_value_any_label(
            labels_for(key),
            lines,
            FieldValidator::for_field(key),
            self.window,
        );
        if !value.is_empty() {
            return value;
        }
        CandidateScanner::find_unanchored(lines, FieldValidator::for_field(key))
    }

    /// Clear every populated field that fails its own validator
    pub fn post_filter(fields: &mut FieldRecord) {
        for key in FieldKey::ALL {
            let value = fields.get(key);
            if !value.is_empty() && !FieldValidator::for_field(key).is_valid(value) {
                debug!("Discarding suspicious {}: {:?}", key.as_str(), value);
                fields.get_mut(key).clear();
            }
        }
    }

    /// Extract both card sides on separate threads and merge the results
    pub fn extract_sides<F, B>(&self, front: &[F], back: Option<&[B]>) -> MergedRecord
    where
        F: AsRef<str> + Sync,
        B: AsRef<str> + Sync,
    {
        let (front_fields, back_fields) = thread::scope(|scope| {
            let back_handle = back.map(|lines| scope.spawn(move || self.extract(lines)));
            let front_fields = self.extract(front);
            let back_fields = back_handle.map(|handle| match handle.join() {
                Ok(fields) => fields,
                Err(panic) => std::panic::resume_unwind(panic),
            });
            (front_fields, back_fields)
        });

        MergedRecord::merge(&front_fields, back_fields)
    }
}
