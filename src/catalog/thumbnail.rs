//! Portrait decoding and thumbnail derivation.

use image::codecs::jpeg::JpegEncoder;
use image::error::{ParameterError, ParameterErrorKind};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageResult};

/// Image decode/encode operations the catalog depends on
pub trait ImageCodec {
    /// Decode an image from its encoded bytes
    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage>;

    /// Encode an image as JPEG at the given quality (1-100)
    fn encode_jpeg(&self, image: &DynamicImage, quality: u8) -> ImageResult<Vec<u8>>;
}

/// [`ImageCodec`] backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl ImageCodec for JpegCodec {
    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage> {
        image::load_from_memory(bytes)
    }

    fn encode_jpeg(&self, image: &DynamicImage, quality: u8) -> ImageResult<Vec<u8>> {
        let mut buf = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        // JPEG has no alpha channel
        DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
        Ok(buf)
    }
}

/// An encoded thumbnail and its dimensions
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Size of a thumbnail `width` pixels wide that keeps the source aspect ratio.
///
/// Height is `round(width * source_height / source_width)`, never less than 1.
/// Returns `None` for an empty source, or when either side would exceed the
/// JPEG limit of 65535 pixels.
#[must_use]
pub fn thumbnail_size(source_width: u32, source_height: u32, width: u32) -> Option<(u32, u32)> {
    if source_width == 0 || source_height == 0 || width == 0 {
        return None;
    }
    let max_side = u32::from(u16::MAX);
    if width > max_side {
        return None;
    }
    let height = (f64::from(width) * f64::from(source_height) / f64::from(source_width)).round();
    if height > f64::from(max_side) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let height = (height as u32).max(1);
    Some((width, height))
}

/// Decode a portrait and produce a JPEG thumbnail of the given width.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded, the image is empty, or
/// the thumbnail cannot be encoded.
pub fn derive_thumbnail(
    codec: &dyn ImageCodec,
    portrait: &[u8],
    width: u32,
    quality: u8,
) -> ImageResult<Thumbnail> {
    let image = codec.decode(portrait)?;
    let (width, height) = thumbnail_size(image.width(), image.height(), width).ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })?;

    let resized = image.resize_exact(width, height, FilterType::Triangle);
    let bytes = codec.encode_jpeg(&resized, quality)?;

    Ok(Thumbnail {
        bytes,
        width,
        height,
    })
}
