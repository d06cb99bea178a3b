//! Image validation for recipe photo uploads.
//!
//! The client validates a photo before base64-encoding it for the convert
//! endpoint; the format is sniffed from the bytes, never trusted from the
//! file extension.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use thiserror::Error;

/// Image formats the gateway accepts for transcription.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for recipe photos (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Unreadable(String),

    #[error("Could not detect image format")]
    UnknownFormat,

    #[error("Unsupported image format: {0:?}. Allowed: JPEG, PNG, GIF, WebP")]
    UnsupportedFormat(ImageFormat),

    #[error("Image too large: {size} bytes (max {MAX_FILE_SIZE})")]
    TooLarge { size: usize },
}

/// Validate photo bytes and return the detected MIME type (e.g. "image/jpeg").
pub fn validate_photo(data: &[u8]) -> Result<String, ImageError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(ImageError::TooLarge { size: data.len() });
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::Unreadable(e.to_string()))?;

    let format = reader.format().ok_or(ImageError::UnknownFormat)?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageError::UnsupportedFormat(format));
    }

    Ok(format.to_mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest well-formed PNG: signature + IHDR for a 1x1 image.
    fn tiny_png() -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0, 0, 0, 13]);
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]);
        bytes.extend_from_slice(&[0x90, 0x77, 0x53, 0xDE]);
        bytes
    }

    #[test]
    fn test_detects_png() {
        assert_eq!(validate_photo(&tiny_png()).unwrap(), "image/png");
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        assert!(validate_photo(b"not an image").is_err());
    }

    #[test]
    fn test_rejects_oversized_photo() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        assert!(matches!(
            validate_photo(&data),
            Err(ImageError::TooLarge { .. })
        ));
    }
}
