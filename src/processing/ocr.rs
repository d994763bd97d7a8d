use crate::utils::ScanError;
use image::{DynamicImage, ImageOutputFormat};
use log::debug;
use std::io::Write;
use tempfile::NamedTempFile;
use tesseract::Tesseract;

/// Turns a card image into its text lines, in reading order.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<String>, ScanError>;
}

/// Tesseract-backed recognizer
pub struct TesseractRecognizer {
    language: String,
    tessdata_dir: Option<String>,
}

impl TesseractRecognizer {
    pub fn new(language: &str, tessdata_dir: Option<&str>) -> Self {
        TesseractRecognizer {
            language: language.to_string(),
            tessdata_dir: tessdata_dir.map(str::to_string),
        }
    }

    /// Tesseract reads from disk, so the image goes through a temporary PNG
    fn write_temp_png(image: &DynamicImage) -> Result<NamedTempFile, ScanError> {
        let mut temp_file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| ScanError::OcrError(format!("Failed to create temp file: {}", e)))?;

        image
            .write_to(temp_file.as_file_mut(), ImageOutputFormat::Png)
            .map_err(|e| ScanError::OcrError(format!("Failed to encode image: {}", e)))?;
        temp_file.flush()?;

        Ok(temp_file)
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<String>, ScanError> {
        let temp_file = Self::write_temp_png(image)?;
        let path_str = temp_file
            .path()
            .to_str()
            .ok_or_else(|| ScanError::OcrError("Failed to convert path to string".to_string()))?;

        let mut tess = Tesseract::new(self.tessdata_dir.as_deref(), Some(self.language.as_str()))
            .map_err(|e| ScanError::OcrError(format!("Tesseract init error: {}", e)))?;
        tess.set_page_seg_mode(tesseract::PageSegMode::PsmAuto);
        let text = tess
            .set_image(path_str)
            .map_err(|e| ScanError::OcrError(format!("Tesseract set image error: {}", e)))?
            .get_text()
            .map_err(|e| ScanError::OcrError(format!("Tesseract error: {}", e)))?;

        let lines = split_lines(&text);
        debug!("OCR lines ({}): {:?}", self.language, lines);
        Ok(lines)
    }
}

/// Non-empty trimmed lines of recognised text
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        let text = "T.C. KİMLİK KARTI\n\n  SOYADI  \r\nYILMAZ\n   \n";
        assert_eq!(split_lines(text), vec!["T.C. KİMLİK KARTI", "SOYADI", "YILMAZ"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_temp_png_is_written() {
        let image = DynamicImage::new_rgb8(4, 3);
        let file = TesseractRecognizer::write_temp_png(&image).unwrap();
        let decoded = image::open(file.path()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }
}
