use crate::config::ScannerConfig;
use crate::models::{ScanData, ScanResponse};
use crate::processing::{
    DocumentDetector, FaceDetector, FieldExtractor, ImageProcessor, TesseractRecognizer,
    TextRecognizer,
};
use crate::utils::ScanError;
use image::DynamicImage;
use log::{debug, error, info, warn};
use std::path::Path;

/// Full card pipeline: OCR, field extraction, merge and image crops.
pub struct IdCardScanner {
    recognizer: Box<dyn TextRecognizer>,
    face_detector: Option<Box<dyn FaceDetector>>,
    document_detector: Option<Box<dyn DocumentDetector>>,
    extractor: FieldExtractor,
    config: ScannerConfig,
}

impl IdCardScanner {
    /// Scanner backed by Tesseract, without face or card detection
    pub fn new(config: ScannerConfig) -> Self {
        let recognizer =
            TesseractRecognizer::new(&config.ocr_language, config.tessdata_dir.as_deref());
        Self::with_recognizer(Box::new(recognizer), config)
    }

    pub fn with_recognizer(recognizer: Box<dyn TextRecognizer>, config: ScannerConfig) -> Self {
        IdCardScanner {
            recognizer,
            face_detector: None,
            document_detector: None,
            extractor: FieldExtractor::new(config.label_window),
            config,
        }
    }

    pub fn with_face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.face_detector = Some(detector);
        self
    }

    pub fn with_document_detector(mut self, detector: Box<dyn DocumentDetector>) -> Self {
        self.document_detector = Some(detector);
        self
    }

    /// Scan a front side and optional back side. Failures are reported in
    /// the envelope rather than returned.
    pub fn scan(&self, front: &DynamicImage, back: Option<&DynamicImage>) -> ScanResponse {
        match self.try_scan(front, back) {
            Ok(data) => ScanResponse::ok(data),
            Err(err) => {
                error!("Scan failed: {}", err);
                ScanResponse::failed(err)
            }
        }
    }

    pub fn scan_files(&self, front: &Path, back: Option<&Path>) -> ScanResponse {
        let images = ImageProcessor::load(front).and_then(|front_image| {
            let back_image = back.map(ImageProcessor::load).transpose()?;
            Ok((front_image, back_image))
        });

        match images {
            Ok((front_image, back_image)) => self.scan(&front_image, back_image.as_ref()),
            Err(err) => {
                error!("Scan failed: {}", err);
                ScanResponse::failed(err)
            }
        }
    }

    /// Text-only pipeline over already recognised lines
    pub fn scan_lines<F, B>(&self, front: &[F], back: Option<&[B]>) -> ScanData
    where
        F: AsRef<str> + Sync,
        B: AsRef<str> + Sync,
    {
        let merged = self.extractor.extract_sides(front, back);
        debug!("Merged fields: {:?}", merged.fields);

        ScanData {
            fields: merged.fields,
            ocr_raw_front: front
                .iter()
                .map(|line| line.as_ref())
                .collect::<Vec<_>>()
                .join("\n"),
            ocr_raw_back: merged.back.map(|fields| fields.raw_echo()),
            ..ScanData::default()
        }
    }

    fn try_scan(
        &self,
        front: &DynamicImage,
        back: Option<&DynamicImage>,
    ) -> Result<ScanData, ScanError> {
        info!("Running OCR on front side");
        let front_lines = self.recognizer.recognize(front)?;
        debug!("Front lines: {:?}", front_lines);

        let back_lines = match back {
            Some(image) => {
                info!("Running OCR on back side");
                let lines = self.recognizer.recognize(image)?;
                debug!("Back lines: {:?}", lines);
                Some(lines)
            }
            None => None,
        };

        let mut data = self.scan_lines(&front_lines, back_lines.as_deref());
        data.photo = self.face_photo(front);
        data.card_crop_front = self.card_crop(front);
        if let Some(image) = back {
            data.card_crop_back = self.card_crop(image);
        }

        Ok(data)
    }

    /// Leftmost face of the image as a data URI, empty when unavailable
    fn face_photo(&self, image: &DynamicImage) -> String {
        let Some(detector) = &self.face_detector else {
            return String::new();
        };

        let crop = detector.detect_faces(image).and_then(|faces| {
            debug!("Detected {} face(s)", faces.len());
            ImageProcessor::face_crop(image, &faces, self.config.face_scale)
                .map(|face| ImageProcessor::png_data_uri(&face))
                .transpose()
        });

        match crop {
            Ok(uri) => uri.unwrap_or_default(),
            Err(err) => {
                warn!("Face crop unavailable: {}", err);
                String::new()
            }
        }
    }

    fn card_crop(&self, image: &DynamicImage) -> String {
        let Some(detector) = &self.document_detector else {
            return String::new();
        };

        let crop = detector.detect_objects(image).and_then(|detections| {
            if let Some(first) = detections.first() {
                debug!(
                    "Card detected at {:?} with confidence {:.2}",
                    first.bounding_box, first.confidence
                );
            }
            ImageProcessor::card_crop(image, &detections)
                .map(|card| ImageProcessor::png_data_uri(&card))
                .transpose()
        });

        match crop {
            Ok(uri) => uri.unwrap_or_default(),
            Err(err) => {
                warn!("Card crop unavailable: {}", err);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::Detection;
    use image::GenericImageView;
    use imageproc::rect::Rect;

    const FRONT_WIDTH: u32 = 100;

    /// Returns canned lines, picking the side by image width
    struct CannedRecognizer {
        front: Vec<String>,
        back: Vec<String>,
    }

    impl TextRecognizer for CannedRecognizer {
        fn recognize(&self, image: &DynamicImage) -> Result<Vec<String>, ScanError> {
            if image.width() == FRONT_WIDTH {
                Ok(self.front.clone())
            } else {
                Ok(self.back.clone())
            }
        }
    }

    struct BrokenRecognizer;

    impl TextRecognizer for BrokenRecognizer {
        fn recognize(&self, _image: &DynamicImage) -> Result<Vec<String>, ScanError> {
            Err(ScanError::OcrError("engine unavailable".to_string()))
        }
    }

    struct FixedFaces(Vec<Rect>);

    impl FaceDetector for FixedFaces {
        fn detect_faces(&self, _image: &DynamicImage) -> Result<Vec<Rect>, ScanError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenDocuments;

    impl DocumentDetector for BrokenDocuments {
        fn detect_objects(&self, _image: &DynamicImage) -> Result<Vec<Detection>, ScanError> {
            Err(ScanError::DetectionError("model not loaded".to_string()))
        }
    }

    struct WholeImage;

    impl DocumentDetector for WholeImage {
        fn detect_objects(&self, image: &DynamicImage) -> Result<Vec<Detection>, ScanError> {
            let (w, h) = image.dimensions();
            Ok(vec![Detection {
                bounding_box: Rect::at(0, 0).of_size(w, h),
                confidence: 0.8,
            }])
        }
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn canned_scanner() -> IdCardScanner {
        let recognizer = CannedRecognizer {
            front: lines(&["10000000146", "SOYADI", "YILMAZ", "ADI", "AHMET", "CİNSİYET", "E/M"]),
            back: lines(&["ANA ADI", "AYŞE", "BABA ADI", "MEHMET", "K/F"]),
        };
        IdCardScanner::with_recognizer(Box::new(recognizer), ScannerConfig::default())
    }

    #[test]
    fn test_scan_front_and_back() {
        let scanner = canned_scanner()
            .with_face_detector(Box::new(FixedFaces(vec![Rect::at(40, 30).of_size(20, 20)])))
            .with_document_detector(Box::new(WholeImage));
        let front = DynamicImage::new_rgb8(FRONT_WIDTH, 80);
        let back = DynamicImage::new_rgb8(120, 80);

        let response = scanner.scan(&front, Some(&back));
        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data.fields.id_number, "10000000146");
        assert_eq!(data.fields.surname, "YILMAZ");
        assert_eq!(data.fields.given_name, "AHMET");
        assert_eq!(data.fields.mother_name, "AYŞE");
        assert_eq!(data.fields.father_name, "MEHMET");
        assert_eq!(data.fields.sex, "ERKEK");
        assert!(data.photo.starts_with("data:image/png;base64,"));
        assert!(data.card_crop_front.starts_with("data:image/png;base64,"));
        assert!(data.card_crop_back.starts_with("data:image/png;base64,"));
        assert!(data.ocr_raw_front.starts_with("10000000146\nSOYADI"));

        // Back sex is dropped from the echo since the merged record already shows one
        let back_echo = data.ocr_raw_back.unwrap();
        assert!(back_echo.contains("MEHMET"));
        assert!(!back_echo.contains("KADIN"));
    }

    #[test]
    fn test_scan_without_detectors_leaves_crops_empty() {
        let scanner = canned_scanner();
        let front = DynamicImage::new_rgb8(FRONT_WIDTH, 80);

        let data = scanner.scan(&front, None).data.unwrap();
        assert_eq!(data.photo, "");
        assert_eq!(data.card_crop_front, "");
        assert_eq!(data.card_crop_back, "");
        assert!(data.ocr_raw_back.is_none());
    }

    #[test]
    fn test_detector_failure_degrades() {
        let scanner = canned_scanner()
            .with_face_detector(Box::new(FixedFaces(Vec::new())))
            .with_document_detector(Box::new(BrokenDocuments));
        let front = DynamicImage::new_rgb8(FRONT_WIDTH, 80);

        let response = scanner.scan(&front, None);
        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data.photo, "");
        assert_eq!(data.card_crop_front, "");
        assert_eq!(data.fields.surname, "YILMAZ");
    }

    #[test]
    fn test_ocr_failure_is_reported() {
        let scanner =
            IdCardScanner::with_recognizer(Box::new(BrokenRecognizer), ScannerConfig::default());
        let front = DynamicImage::new_rgb8(FRONT_WIDTH, 80);

        let response = scanner.scan(&front, None);
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("OCR error: engine unavailable"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let scanner = canned_scanner();
        let response = scanner.scan_files(Path::new("/nonexistent/front.png"), None);
        assert!(!response.success);
        assert!(response.error.unwrap().starts_with("Image processing error"));
    }

    #[test]
    fn test_scan_lines_empty_input() {
        let scanner = canned_scanner();
        let empty: Vec<String> = Vec::new();
        let data = scanner.scan_lines(&empty, Some(empty.as_slice()));
        assert!(data.fields.is_empty());
        assert_eq!(data.ocr_raw_front, "");
        assert_eq!(data.ocr_raw_back.as_deref(), Some(""));
    }
}
