use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::io::Reader as ImageReader;
use image::{ColorType, DynamicImage, GenericImageView, ImageEncoder, ImageFormat};
use std::fmt;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("image payload is empty")]
    Empty,
    #[error("image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unrecognized image format")]
    UnknownFormat,
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded photo together with the bytes it was decoded from.
///
/// The encoded bytes are kept so the picture can be forwarded upstream
/// without re-encoding; the decoded pixels prove the payload is a real image.
#[derive(Clone)]
pub struct Raster {
    bytes: Vec<u8>,
    format: ImageFormat,
    pixels: DynamicImage,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// MIME type matching the encoded bytes.
    pub fn mime(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            _ => "application/octet-stream",
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Standard base64 of the original encoded bytes.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("mime", &self.mime())
            .field("width", &self.width())
            .field("height", &self.height())
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Split a `data:<mime>;base64,<data>` URL into its MIME type and payload.
///
/// Returns `None` when `url` is not a data URL.
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (prefix, data) = rest.split_once(',')?;
    Some((prefix.trim_end_matches(";base64"), data))
}

/// Decode a base64 image payload, accepting bare base64 or a data URL.
///
/// ASCII whitespace inside the payload is ignored, so line-wrapped base64
/// decodes the same as a single line.
pub fn decode_base64(payload: &str) -> Result<Raster, VisionError> {
    let payload = payload.trim();
    let data = match split_data_url(payload) {
        Some((mime, data)) => {
            debug!(%mime, "stripped data url prefix");
            data
        }
        None => payload,
    };
    if data.is_empty() {
        return Err(VisionError::Empty);
    }
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64.decode(compact)?;
    decode_bytes(bytes)
}

/// Decode raw encoded image bytes (PNG, JPEG or WebP).
pub fn decode_bytes(bytes: Vec<u8>) -> Result<Raster, VisionError> {
    if bytes.is_empty() {
        return Err(VisionError::Empty);
    }
    let reader = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| VisionError::Decode(image::ImageError::IoError(e)))?;
    let format = reader.format().ok_or(VisionError::UnknownFormat)?;
    let pixels = reader.decode()?;
    debug!(?format, width = pixels.width(), height = pixels.height(), "image decoded");
    Ok(Raster {
        bytes,
        format,
        pixels,
    })
}

/// Encode `image` as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, VisionError> {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(rgba.as_raw(), w, h, ColorType::Rgba8)?;
    Ok(buf)
}
