use crate::models::{is_label, FieldKey, Sex};
use crate::validation::ChecksumValidator;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-zÇĞİÖŞÜçğıöşü ]+$").unwrap();
    static ref DATE_PATTERN: Regex = Regex::new(r"\d{2}[./-]\d{2}[./-]\d{4}").unwrap();
}

/// Stray OCR detections that are never a field value on their own
const PUNCTUATION_ARTIFACTS: [&str; 4] = ["-", "(", ")", "(S)"];

const MALE_TOKENS: [&str; 2] = ["ERKEK", "MALE"];
const FEMALE_TOKENS: [&str; 2] = ["KADIN", "FEMALE"];
const MALE_PREFIX: &str = "E/M";
const FEMALE_PREFIX: &str = "K/F";

/// Validity predicate for one class of field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidator {
    IdNumber,
    Name { min_len: usize },
    Date,
    Sex,
}

impl FieldValidator {
    pub fn for_field(key: FieldKey) -> Self {
        match key {
            FieldKey::IdNumber => FieldValidator::IdNumber,
            FieldKey::GivenName | FieldKey::Surname => FieldValidator::Name { min_len: 2 },
            FieldKey::MotherName | FieldKey::FatherName => FieldValidator::Name { min_len: 4 },
            FieldKey::BirthDate => FieldValidator::Date,
            FieldKey::Sex => FieldValidator::Sex,
        }
    }

    /// Turn a raw OCR line into a field value, or reject it.
    ///
    /// Names come back trimmed, dates as the matched date substring and sex
    /// as its canonical token.
    pub fn accept(&self, line: &str) -> Option<String> {
        let candidate = line.trim();
        match self {
            FieldValidator::IdNumber => ChecksumValidator::find_candidate(candidate)
                .filter(|id| ChecksumValidator::validate_id(id))
                .map(str::to_string),
            FieldValidator::Name { min_len } => {
                is_valid_name(candidate, *min_len).then(|| candidate.to_string())
            }
            FieldValidator::Date => find_date(candidate).map(str::to_string),
            FieldValidator::Sex => parse_sex(candidate).map(|sex| sex.as_str().to_string()),
        }
    }

    /// Full rejection rule set applied to an already extracted value
    pub fn is_valid(&self, value: &str) -> bool {
        match self {
            FieldValidator::Name { min_len } => is_valid_name(value, *min_len),
            FieldValidator::IdNumber => {
                passes_artifact_rules(value, 2) && ChecksumValidator::validate_id(value.trim())
            }
            FieldValidator::Date => passes_artifact_rules(value, 2) && find_date(value).is_some(),
            FieldValidator::Sex => passes_artifact_rules(value, 2) && parse_sex(value).is_some(),
        }
    }
}

/// Label, length, punctuation and leading-character checks shared by every field
fn passes_artifact_rules(value: &str, min_len: usize) -> bool {
    let trimmed = value.trim();
    !is_label(trimmed)
        && value.chars().count() >= min_len
        && !PUNCTUATION_ARTIFACTS.contains(&value)
        && !trimmed.starts_with(['/', ':', '-'])
}

pub fn is_valid_name(value: &str, min_len: usize) -> bool {
    passes_artifact_rules(value, min_len) && NAME_PATTERN.is_match(value)
}

pub fn find_date(text: &str) -> Option<&str> {
    DATE_PATTERN.find(text).map(|m| m.as_str())
}

fn normalize_sex(value: &str) -> String {
    value
        .replace(' ', "")
        .replace(['-', '.', '\\'], "/")
        .to_uppercase()
}

/// Male is checked before female
pub fn parse_sex(value: &str) -> Option<Sex> {
    let normalized = normalize_sex(value);
    if MALE_TOKENS.contains(&normalized.as_str()) || normalized.starts_with(MALE_PREFIX) {
        Some(Sex::Male)
    } else if FEMALE_TOKENS.contains(&normalized.as_str()) || normalized.starts_with(FEMALE_PREFIX) {
        Some(Sex::Female)
    } else {
        None
    }
}
