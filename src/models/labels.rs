// Printed captions that introduce each field on the card, including the
// English equivalents and misreads seen in real OCR output.
use crate::models::FieldKey;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// How a label is recognised inside an OCR line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Matches when the line equals or contains the label
    Contains(&'static str),
    /// Matches only as a whole word; used for the bare "name" caption which
    /// would otherwise fire inside the longer parent-name captions
    WholeWord(&'static str),
}

impl Label {
    pub fn text(&self) -> &'static str {
        match self {
            Label::Contains(text) | Label::WholeWord(text) => *text,
        }
    }

    /// `line` must already be trimmed and uppercased
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Label::Contains(text) => line == *text || line.contains(text),
            Label::WholeWord(text) => WORD_PATTERNS
                .iter()
                .find(|(word, _)| word == text)
                .map(|(_, pattern)| pattern.is_match(line))
                .unwrap_or(false),
        }
    }
}

const GIVEN_NAME_LABELS: &[Label] = &[
    Label::WholeWord("ADI"),
    Label::Contains("GIVEN NAME"),
    Label::Contains("GIVEN NAME(S)"),
    Label::Contains("ADİ"),
];

const SURNAME_LABELS: &[Label] = &[
    Label::Contains("SOYADI"),
    Label::Contains("SURNAME"),
    Label::Contains("SOYADİ"),
];

const MOTHER_NAME_LABELS: &[Label] = &[
    Label::Contains("ANA ADI"),
    Label::Contains("MOTHER'S NAME"),
    Label::Contains("ANA ADİ"),
    Label::Contains("MOTRERS"),
    Label::Contains("MOTHRERS"),
    Label::Contains("MOTERS"),
    Label::Contains("AFFE"),
    Label::Contains("FFE"),
];

const FATHER_NAME_LABELS: &[Label] = &[
    Label::Contains("BABA ADI"),
    Label::Contains("FATHER'S NAME"),
    Label::Contains("BABA ADİ"),
    Label::Contains("FATNERS"),
    Label::Contains("FATHERS"),
    Label::Contains("FATERS"),
    Label::Contains("BACZ"),
];

const BIRTH_DATE_LABELS: &[Label] = &[
    Label::Contains("DOĞUM TARIHI"),
    Label::Contains("DATE OF BIRTH"),
    Label::Contains("DOGUM TARIHI"),
    Label::Contains("DOĞUM TATİHİ"),
];

const SEX_LABELS: &[Label] = &[
    Label::Contains("CİNSİYET"),
    Label::Contains("GENDER"),
    Label::Contains("GANDER"),
];

/// Ordered labels for a field. The identity number is found without a label.
pub fn labels_for(key: FieldKey) -> &'static [Label] {
    match key {
        FieldKey::IdNumber => &[],
        FieldKey::GivenName => GIVEN_NAME_LABELS,
        FieldKey::Surname => SURNAME_LABELS,
        FieldKey::MotherName => MOTHER_NAME_LABELS,
        FieldKey::FatherName => FATHER_NAME_LABELS,
        FieldKey::BirthDate => BIRTH_DATE_LABELS,
        FieldKey::Sex => SEX_LABELS,
    }
}

lazy_static! {
    /// Every label of every field, used to reject values that are really captions
    pub static ref ALL_LABELS: HashSet<&'static str> = FieldKey::ALL
        .iter()
        .flat_map(|key| labels_for(*key).iter().map(|label| label.text()))
        .collect();

    static ref WORD_PATTERNS: Vec<(&'static str, Regex)> = FieldKey::ALL
        .iter()
        .flat_map(|key| labels_for(*key).iter())
        .filter_map(|label| match label {
            Label::WholeWord(text) => Regex::new(&format!(r"\b{}\b", regex::escape(text)))
                .ok()
                .map(|pattern| (*text, pattern)),
            Label::Contains(_) => None,
        })
        .collect();
}

/// Case-insensitive membership in the flattened label set
pub fn is_label(value: &str) -> bool {
    ALL_LABELS.contains(value.trim().to_uppercase().as_str())
}
