pub mod detection;
pub mod extraction;
pub mod image;
pub mod ocr;
pub mod scanner;

pub use detection::{Detection, DocumentDetector, FaceDetector};
pub use extraction::FieldExtractor;
pub use image::ImageProcessor;
pub use ocr::{TesseractRecognizer, TextRecognizer};
pub use scanner::CandidateScanner;
