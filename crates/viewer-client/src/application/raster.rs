//! Snapshot downscaling and PNG data-URL encoding.
//!
//! A thumbnail is the flattened display scaled to fit the configured bounding
//! box (never enlarged), encoded as PNG, and wrapped in a `data:` URL so it can
//! be stored as a plain string and used directly as an image source.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops, imageops::FilterType, DynamicImage, ImageFormat};
use thiserror::Error;
use viewer_core::thumbnail_dimensions;

use super::session::Snapshot;

/// Prefix of every encoded thumbnail.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Errors produced while rendering a thumbnail.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The snapshot has no pixels.
    #[error("snapshot is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Scales `snapshot` to fit within `max_width`×`max_height` and encodes it as
/// a PNG data URL.
///
/// # Errors
///
/// Returns [`RasterError::Empty`] for a zero-sized snapshot,
/// and [`RasterError::Encode`] if the PNG encoder fails.
pub fn thumbnail_data_url(
    snapshot: &Snapshot,
    max_width: u32,
    max_height: u32,
) -> Result<String, RasterError> {
    let (width, height) = snapshot.dimensions();
    let (thumb_w, thumb_h) = thumbnail_dimensions(width, height, max_width, max_height);
    if thumb_w == 0 || thumb_h == 0 {
        return Err(RasterError::Empty { width, height });
    }

    let scaled = if (thumb_w, thumb_h) == (width, height) {
        snapshot.clone()
    } else {
        imageops::resize(snapshot, thumb_w, thumb_h, FilterType::Triangle)
    };

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(scaled).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png)))
}
