use crate::processing::scanner::DEFAULT_WINDOW;
use crate::utils::ScanError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime settings for the scan pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Lines searched after a caption for its value
    pub label_window: usize,
    /// Tesseract language code
    pub ocr_language: String,
    /// Directory holding the Tesseract traineddata files
    pub tessdata_dir: Option<String>,
    /// Side of the square face crop relative to the detected face
    pub face_scale: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            label_window: DEFAULT_WINDOW,
            ocr_language: "tur".to_string(),
            tessdata_dir: None,
            face_scale: 1.3,
        }
    }
}

impl ScannerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let contents = std::fs::read_to_string(&path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ScanError> {
        let config: ScannerConfig = serde_json::from_str(json)
            .map_err(|e| ScanError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.label_window == 0 {
            return Err(ScanError::ConfigError("label_window must be at least 1".to_string()));
        }
        if self.ocr_language.trim().is_empty() {
            return Err(ScanError::ConfigError("ocr_language must not be empty".to_string()));
        }
        if self.face_scale.is_nan() || self.face_scale < 1.0 {
            return Err(ScanError::ConfigError(format!(
                "face_scale must be at least 1.0, got {}",
                self.face_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScannerConfig::from_json(r#"{"label_window": 5}"#).unwrap();
        assert_eq!(config.label_window, 5);
        assert_eq!(config.ocr_language, "tur");
        assert_eq!(config.face_scale, 1.3);
        assert!(config.tessdata_dir.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ScannerConfig::from_json(r#"{"label_window": 0}"#),
            Err(ScanError::ConfigError(_))
        ));
        assert!(ScannerConfig::from_json(r#"{"face_scale": 0.5}"#).is_err());
        assert!(ScannerConfig::from_json(r#"{"ocr_language": " "}"#).is_err());
        assert!(ScannerConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ocr_language": "tur+eng", "tessdata_dir": "/opt/tessdata"}}"#).unwrap();
        let config = ScannerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ocr_language, "tur+eng");
        assert_eq!(config.tessdata_dir.as_deref(), Some("/opt/tessdata"));

        assert!(matches!(
            ScannerConfig::from_file("/nonexistent/kimlik.json"),
            Err(ScanError::IoError(_))
        ));
    }
}
