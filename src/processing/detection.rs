use crate::utils::ScanError;
use image::DynamicImage;
use imageproc::rect::Rect;

/// Locates faces on a card image.
pub trait FaceDetector: Send + Sync {
    fn detect_faces(&self, image: &DynamicImage) -> Result<Vec<Rect>, ScanError>;
}

/// A detected object with its bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bounding_box: Rect,
    pub confidence: f32,
}

/// Locates the card itself inside a photo.
pub trait DocumentDetector: Send + Sync {
    fn detect_objects(&self, image: &DynamicImage) -> Result<Vec<Detection>, ScanError>;
}
