use serde::{Deserialize, Serialize};

/// The seven logical fields read from an identity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    IdNumber,
    GivenName,
    Surname,
    MotherName,
    FatherName,
    BirthDate,
    Sex,
}

impl FieldKey {
    /// All keys in record order
    pub const ALL: [FieldKey; 7] = [
        FieldKey::IdNumber,
        FieldKey::GivenName,
        FieldKey::Surname,
        FieldKey::MotherName,
        FieldKey::FatherName,
        FieldKey::BirthDate,
        FieldKey::Sex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::IdNumber => "id_number",
            FieldKey::GivenName => "given_name",
            FieldKey::Surname => "surname",
            FieldKey::MotherName => "mother_name",
            FieldKey::FatherName => "father_name",
            FieldKey::BirthDate => "birth_date",
            FieldKey::Sex => "sex",
        }
    }
}

/// Sex as printed on the card, reduced to one of two canonical tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "ERKEK",
            Sex::Female => "KADIN",
        }
    }
}

/// Extracted values for one side of a card. An empty string means absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub id_number: String,
    pub given_name: String,
    pub surname: String,
    pub mother_name: String,
    pub father_name: String,
    pub birth_date: String,
    pub sex: String,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::IdNumber => &self.id_number,
            FieldKey::GivenName => &self.given_name,
            FieldKey::Surname => &self.surname,
            FieldKey::MotherName => &self.mother_name,
            FieldKey::FatherName => &self.father_name,
            FieldKey::BirthDate => &self.birth_date,
            FieldKey::Sex => &self.sex,
        }
    }

    pub fn get_mut(&mut self, key: FieldKey) -> &mut String {
        match key {
            FieldKey::IdNumber => &mut self.id_number,
            FieldKey::GivenName => &mut self.given_name,
            FieldKey::Surname => &mut self.surname,
            FieldKey::MotherName => &mut self.mother_name,
            FieldKey::FatherName => &mut self.father_name,
            FieldKey::BirthDate => &mut self.birth_date,
            FieldKey::Sex => &mut self.sex,
        }
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        *self.get_mut(key) = value.into();
    }

    pub fn is_empty(&self) -> bool {
        FieldKey::ALL.iter().all(|key| self.get(*key).is_empty())
    }

    /// Non-empty values joined by newlines, in key order
    pub fn raw_echo(&self) -> String {
        FieldKey::ALL
            .iter()
            .map(|key| self.get(*key))
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Front and back records combined with front-side priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    pub fields: FieldRecord,
    /// Back-side record as it should be echoed, with duplicated values cleared
    pub back: Option<FieldRecord>,
}

impl MergedRecord {
    pub fn merge(front: &FieldRecord, back: Option<FieldRecord>) -> Self {
        let mut fields = FieldRecord::new();
        for key in FieldKey::ALL {
            let front_value = front.get(key);
            let value = if !front_value.is_empty() {
                front_value
            } else {
                back.as_ref().map(|b| b.get(key)).unwrap_or("")
            };
            fields.set(key, value);
        }

        // The merged sex is already displayed, so the back echo must not repeat it
        let back = back.map(|mut b| {
            if !fields.sex.is_empty() {
                b.sex.clear();
            }
            b
        });

        MergedRecord { fields, back }
    }
}

/// Successful scan payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanData {
    #[serde(flatten)]
    pub fields: FieldRecord,
    /// Face crop of the front side as a PNG data URI, or empty
    pub photo: String,
    pub card_crop_front: String,
    pub card_crop_back: String,
    pub ocr_raw_front: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_raw_back: Option<String>,
}

/// Success/error envelope returned by the scan pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ScanData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResponse {
    pub fn ok(data: ScanData) -> Self {
        ScanResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        ScanResponse {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}
