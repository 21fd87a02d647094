//! Image preprocessing ahead of OCR.
//!
//! Steps, in order: decode, force 8-bit RGB, downscale so the longest side
//! fits `max_dimension` (Lanczos3), contrast boost, sharpness boost, PNG
//! re-encode. PNG is lossless, so the enhancement is the only change the
//! OCR engines see.
//!
//! The enhancement filters blend each pixel with a "degenerate" image and
//! extrapolate by the factor: `out = degenerate + factor * (pixel - degenerate)`.
//! For contrast the degenerate image is flat mean luminance; for sharpness
//! it is the image under a 3×3 smoothing kernel. A factor of 1.0 is the
//! identity for both.
//!
//! Preprocessing is best-effort: [`preprocess`] never fails and hands the
//! original buffer back untouched when anything goes wrong.

use crate::config::ExtractorConfig;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::borrow::Cow;
use std::io::Cursor;
use tracing::{debug, warn};

/// Knobs for [`preprocess`], usually taken from [`ExtractorConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessOptions {
    pub max_dimension: u32,
    pub contrast: f32,
    pub sharpness: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self::from(&ExtractorConfig::default())
    }
}

impl From<&ExtractorConfig> for PreprocessOptions {
    fn from(config: &ExtractorConfig) -> Self {
        Self {
            max_dimension: config.max_image_dimension,
            contrast: config.contrast,
            sharpness: config.sharpness,
        }
    }
}

/// Preprocess `bytes` for OCR, falling back to the original bytes on any
/// failure.
pub fn preprocess<'a>(bytes: &'a [u8], opts: &PreprocessOptions) -> Cow<'a, [u8]> {
    match try_preprocess(bytes, opts) {
        Ok(processed) => {
            debug!(
                "Preprocessed image: {} → {} bytes",
                bytes.len(),
                processed.len()
            );
            Cow::Owned(processed)
        }
        Err(e) => {
            warn!("Image preprocessing failed, using original bytes: {}", e);
            Cow::Borrowed(bytes)
        }
    }
}

fn try_preprocess(bytes: &[u8], opts: &PreprocessOptions) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let rgb = match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    };
    let rgb = downscale(rgb, opts.max_dimension);
    let rgb = enhance_contrast(&rgb, opts.contrast);
    let rgb = enhance_sharpness(&rgb, opts.sharpness);

    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Uniformly shrink so the longer side equals `max_dimension`.
fn downscale(img: RgbImage, max_dimension: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let longest = w.max(h);
    if longest <= max_dimension {
        return img;
    }
    let ratio = max_dimension as f64 / longest as f64;
    let scale = |side: u32| {
        if side == longest {
            max_dimension
        } else {
            ((side as f64 * ratio) as u32).max(1)
        }
    };
    let (new_w, new_h) = (scale(w), scale(h));
    debug!("Downscaling {}x{} → {}x{}", w, h, new_w, new_h);
    image::imageops::resize(&img, new_w, new_h, FilterType::Lanczos3)
}

/// Contrast against the mean luminance (ITU-R 601-2 weights).
pub(crate) fn enhance_contrast(img: &RgbImage, factor: f32) -> RgbImage {
    let pixels = (img.width() as u64) * (img.height() as u64);
    if pixels == 0 {
        return img.clone();
    }
    let luminance_sum: u64 = img
        .pixels()
        .map(|Rgb([r, g, b])| (*r as u64 * 299 + *g as u64 * 587 + *b as u64 * 114) / 1000)
        .sum();
    let mean = (luminance_sum as f64 / pixels as f64 + 0.5).floor() as f32;

    let mut out = img.clone();
    for px in out.pixels_mut() {
        for c in px.0.iter_mut() {
            *c = blend(mean, *c as f32, factor);
        }
    }
    out
}

/// Sharpness against a 3×3 smooth (`1 1 1 / 1 5 1 / 1 1 1`, weight 13).
/// Border pixels are left as they are.
pub(crate) fn enhance_sharpness(img: &RgbImage, factor: f32) -> RgbImage {
    let (w, h) = img.dimensions();
    let mut out = img.clone();
    if w < 3 || h < 3 {
        return out;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut acc = [0u32; 3];
            for dy in 0..3 {
                for dx in 0..3 {
                    let weight = if dx == 1 && dy == 1 { 5 } else { 1 };
                    let Rgb(p) = img.get_pixel(x + dx - 1, y + dy - 1);
                    for (a, v) in acc.iter_mut().zip(p.iter()) {
                        *a += *v as u32 * weight;
                    }
                }
            }
            let Rgb(orig) = img.get_pixel(x, y);
            let mut px = [0u8; 3];
            for i in 0..3 {
                let smooth = ((acc[i] as f32) / 13.0).round();
                px[i] = blend(smooth, orig[i] as f32, factor);
            }
            out.put_pixel(x, y, Rgb(px));
        }
    }
    out
}

fn blend(degenerate: f32, value: f32, factor: f32) -> u8 {
    (degenerate + factor * (value - degenerate))
        .round()
        .clamp(0.0, 255.0) as u8
}
