use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub struct ImageProcessor {
    settings: ConversionSettings,
}

impl ImageProcessor {
    pub fn new() -> Self {
        Self {
            settings: ConversionSettings::default(),
        }
    }

    pub fn with_settings(settings: ConversionSettings) -> Self {
        Self { settings }
    }

    /// Decode `content` and re-encode it as `target`.
    pub fn convert(&self, content: &[u8], target: OutputFormat) -> Result<Vec<u8>, ConversionError> {
        let img = image::load_from_memory(content)?;
        log::info!(
            "Decoded {}x{} image ({:?})",
            img.width(),
            img.height(),
            img.color()
        );

        let prepared = self.prepare_for(img, target);
        let encoded = match target {
            OutputFormat::Jpg => self.encode_jpeg_within_budget(&prepared.into_rgb8())?,
            OutputFormat::Png => self.encode_with(&prepared, ImageFormat::Png)?,
            OutputFormat::Bmp => self.encode_with(&prepared, ImageFormat::Bmp)?,
            OutputFormat::WebP => self.encode_with(&prepared, ImageFormat::WebP)?,
            other => {
                return Err(ConversionError::UnsupportedConversion {
                    from: "image".to_string(),
                    to: other,
                })
            }
        };

        log::info!("Encoded {} image: {} bytes", target, encoded.len());
        Ok(encoded)
    }

    /// Drop alpha for targets that can't store it, and bring pixel data to
    /// 8 bits for encoders that only accept 8-bit input.
    fn prepare_for(&self, img: DynamicImage, target: OutputFormat) -> DynamicImage {
        let has_alpha = img.color().has_alpha();
        if has_alpha && !target.supports_alpha() {
            log::info!("Flattening transparency onto white for {}", target);
            return DynamicImage::ImageRgb8(flatten_onto_white(&img));
        }

        match target {
            OutputFormat::Png => img,
            _ if has_alpha => DynamicImage::ImageRgba8(img.into_rgba8()),
            _ => DynamicImage::ImageRgb8(img.into_rgb8()),
        }
    }

    /// Encode JPEG at the configured quality, stepping quality down while the
    /// output exceeds `max_size`.
    fn encode_jpeg_within_budget(&self, img: &RgbImage) -> Result<Vec<u8>, ConversionError> {
        let mut quality = self.settings.quality.clamp(1, 100);
        let max_size = match self.settings.max_size {
            Some(max_size) => max_size,
            None => return self.encode_jpeg(img, quality),
        };

        for _ in 0..self.settings.max_iterations.max(1) {
            let compressed = self.encode_jpeg(img, quality)?;
            if compressed.len() as u64 <= max_size {
                log::info!(
                    "JPEG compressed to {} bytes with {}% quality",
                    compressed.len(),
                    quality
                );
                return Ok(compressed);
            }
            if quality <= 10 {
                break;
            }
            quality = std::cmp::max(10, (quality as f32 * 0.85) as u8);
        }

        Err(ConversionError::CompressionFailed {
            message: format!(
                "Could not compress JPEG to {} bytes after {} iterations",
                max_size, self.settings.max_iterations
            ),
        })
    }

    fn encode_jpeg(&self, img: &RgbImage, quality: u8) -> Result<Vec<u8>, ConversionError> {
        let mut output = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut output, quality);
        img.write_with_encoder(encoder)?;
        Ok(output)
    }

    fn encode_with(&self, img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ConversionError> {
        let mut output = Vec::new();
        let mut cursor = Cursor::new(&mut output);

        img.write_to(&mut cursor, format)?;
        Ok(output)
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Composite every pixel over an opaque white background.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let blend = |channel: u8| -> u8 {
            ((channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8
        };
        flattened.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    flattened
}
