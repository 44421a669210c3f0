use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageEncoder, RgbImage, RgbaImage};

use crate::error::CognitiveError;

/// Upload size the analysis services accept.
///
/// Larger payloads are rejected server-side. They are still sent as-is.
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Decode input bytes into a `DynamicImage`.
pub(crate) fn decode_image(input: &[u8]) -> Result<DynamicImage, CognitiveError> {
    image::load_from_memory(input).map_err(|e| CognitiveError::Decode(e.to_string()))
}

/// Flatten alpha channel by compositing onto a white background.
pub(crate) fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba: RgbaImage = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

/// Encode an RGB image as JPEG at `quality` (0.0–1.0).
pub(crate) fn encode_jpeg(image: &RgbImage, quality: f32) -> Result<Vec<u8>, CognitiveError> {
    let mut buffer = Vec::new();
    let quality_percent = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    JpegEncoder::new_with_quality(&mut buffer, quality_percent)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CognitiveError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Re-encode a photo as JPEG for upload: decode → flatten → encode.
///
/// Accepts any format the `image` crate can decode. Dimensions are kept.
pub fn encode_for_upload(input: &[u8], quality: f32) -> Result<Vec<u8>, CognitiveError> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(CognitiveError::Configuration(format!(
            "jpeg quality must be between 0.0 and 1.0, got {quality}"
        )));
    }

    let decoded = decode_image(input)?;
    let data = encode_jpeg(&flatten_alpha(&decoded), quality)?;

    if data.len() > MAX_UPLOAD_BYTES {
        tracing::warn!(
            bytes = data.len(),
            limit = MAX_UPLOAD_BYTES,
            "upload exceeds the service size limit"
        );
    }
    tracing::debug!(
        original = input.len(),
        encoded = data.len(),
        width = decoded.width(),
        height = decoded.height(),
        "re-encoded image for upload"
    );
    Ok(data)
}
