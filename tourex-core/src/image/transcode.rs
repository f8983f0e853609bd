use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType};
use tourex_model::TourId;

use crate::error::{Result, TourError};

/// Canonical output resolution, 3:2.
pub const OUTPUT_WIDTH: u32 = 2000;
pub const OUTPUT_HEIGHT: u32 = 1333;
/// Canonical output quality.
pub const JPEG_QUALITY: u8 = 90;
pub const OUTPUT_EXT: &str = "jpeg";

/// An image file lifted out of a multipart request: the raw bytes plus the
/// content type the client declared for them.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl UploadedImage {
    /// Whether the declared content type is in the image category.
    pub fn is_image(&self) -> bool {
        is_image_content_type(&self.content_type)
    }
}

/// Acceptance policy for uploads: only the image category passes.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// The role a transcoded file plays on its tour record. Gallery indices are
/// 1-based and refer to the upload order within one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Cover,
    Gallery(u32),
}

/// Build the canonical filename for a transcoded tour image.
///
/// All files written for one request share `stamp_millis`, so they are
/// disambiguated by role alone; collisions across requests are avoided by
/// the timestamp component.
pub fn image_filename(tour_id: TourId, stamp_millis: i64, role: ImageRole) -> String {
    match role {
        ImageRole::Cover => {
            format!("tour-{}-{}-cover.{}", tour_id, stamp_millis, OUTPUT_EXT)
        }
        ImageRole::Gallery(index) => {
            format!("tour-{}-{}-{}.{}", tour_id, stamp_millis, index, OUTPUT_EXT)
        }
    }
}

/// Re-encode an uploaded image to the canonical format.
///
/// Decodes from memory, scales to [`OUTPUT_WIDTH`]×[`OUTPUT_HEIGHT`]
/// (cropping to fill, never distorting), and emits JPEG at
/// [`JPEG_QUALITY`]. Runs on the blocking pool; decoding and Lanczos
/// resampling are CPU-bound.
pub async fn transcode_jpeg(bytes: Vec<u8>) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || encode_jpeg(&bytes))
        .await
        .map_err(|e| TourError::Internal(format!("transcode task failed: {}", e)))?
}

fn encode_jpeg(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| TourError::ImageProcessing(format!("failed to decode upload: {}", e)))?;

    let resized = decoded
        .resize_to_fill(OUTPUT_WIDTH, OUTPUT_HEIGHT, FilterType::Lanczos3)
        .to_rgb8();

    let mut out = Cursor::new(Vec::new());
    resized
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))
        .map_err(|e| TourError::ImageProcessing(format!("failed to encode jpeg: {}", e)))?;

    Ok(out.into_inner())
}
