//! Image metadata for `--info`: format, pixel mode and dimensions.
//!
//! Failures are swallowed and reported as `None`; the metadata is a side
//! channel and must never abort the extraction itself.

use crate::output::ImageInfo;
use image::{ColorType, ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::debug;

/// Decode `bytes` and describe the image, or `None` if it cannot be read.
pub fn image_info(bytes: &[u8]) -> Option<ImageInfo> {
    let reader = match ImageReader::new(Cursor::new(bytes)).with_guessed_format() {
        Ok(r) => r,
        Err(e) => {
            debug!("Image info unavailable: {}", e);
            return None;
        }
    };
    let format = reader.format().map(format_name);
    let img = match reader.decode() {
        Ok(img) => img,
        Err(e) => {
            debug!("Image info unavailable: {}", e);
            return None;
        }
    };

    let (width, height) = (img.width(), img.height());
    Some(ImageInfo {
        format,
        mode: mode_name(img.color()),
        size: (width, height),
        width,
        height,
    })
}

/// Upper-case container name.
fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        other => format!("{other:?}").to_uppercase(),
    }
}

/// Conventional pixel-mode name for a decoded colour type.
fn mode_name(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;F",
        ColorType::Rgba32F => "RGBA;F",
        other => return format!("{other:?}"),
    }
    .to_string()
}
