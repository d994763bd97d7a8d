use crate::processing::detection::Detection;
use crate::utils::ScanError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use imageproc::rect::Rect;
use std::io::Cursor;
use std::path::Path;

/// Pixel region as (x, y, width, height)
pub type CropRegion = (u32, u32, u32, u32);

pub struct ImageProcessor;

impl ImageProcessor {
    pub fn load(image_path: &Path) -> Result<DynamicImage, ScanError> {
        image::open(image_path).map_err(|e| {
            ScanError::ImageProcessingError(format!(
                "Failed to open image {}: {}",
                image_path.display(),
                e
            ))
        })
    }

    /// Square region around the leftmost face.
    ///
    /// The square's side is `scale` times the larger face dimension, centred
    /// on the face, and pushed back inside the image when it overhangs an edge.
    pub fn face_region(faces: &[Rect], width: u32, height: u32, scale: f64) -> Option<CropRegion> {
        let face = faces.iter().min_by_key(|rect| rect.left())?;

        let (w, h) = (face.width() as i64, face.height() as i64);
        let cx = face.left() as i64 + w / 2;
        let cy = face.top() as i64 + h / 2;
        let side = (w.max(h) as f64 * scale) as i64;

        let x1 = (cx - side / 2).max(0);
        let y1 = (cy - side / 2).max(0);
        let x2 = (x1 + side).min(width as i64);
        let y2 = (y1 + side).min(height as i64);
        let x1 = (x2 - side).max(0);
        let y1 = (y2 - side).max(0);

        Self::region(x1, y1, x2, y2)
    }

    /// Bounding box of the first detection, clipped to the image
    pub fn card_region(detections: &[Detection], width: u32, height: u32) -> Option<CropRegion> {
        let rect = detections.first()?.bounding_box;

        let x1 = (rect.left() as i64).clamp(0, width as i64);
        let y1 = (rect.top() as i64).clamp(0, height as i64);
        let x2 = (rect.left() as i64 + rect.width() as i64).clamp(0, width as i64);
        let y2 = (rect.top() as i64 + rect.height() as i64).clamp(0, height as i64);

        Self::region(x1, y1, x2, y2)
    }

    fn region(x1: i64, y1: i64, x2: i64, y2: i64) -> Option<CropRegion> {
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some((x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32))
    }

    pub fn face_crop(image: &DynamicImage, faces: &[Rect], scale: f64) -> Option<DynamicImage> {
        let (width, height) = image.dimensions();
        Self::face_region(faces, width, height, scale).map(|(x, y, w, h)| image.crop_imm(x, y, w, h))
    }

    pub fn card_crop(image: &DynamicImage, detections: &[Detection]) -> Option<DynamicImage> {
        let (width, height) = image.dimensions();
        Self::card_region(detections, width, height).map(|(x, y, w, h)| image.crop_imm(x, y, w, h))
    }

    /// PNG-encode an image as a `data:` URI
    pub fn png_data_uri(image: &DynamicImage) -> Result<String, ScanError> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .map_err(|e| ScanError::ImageProcessingError(format!("Failed to encode PNG: {}", e)))?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(buffer.into_inner())))
    }
}
