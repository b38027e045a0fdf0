//! Remote image download and re-encoding.

use crate::error::{Result, WordPressError};
use crate::traits::HttpClient;
use image::{DynamicImage, ImageFormat};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// An image encoding media can be uploaded as.
///
/// Parsed from an extension-like name (`"webp"`, `"png"`, `"jpg"`, ...) and
/// limited to formats the image library can write from 8-bit pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadFormat(ImageFormat);

impl UploadFormat {
    pub const WEBP: Self = Self(ImageFormat::WebP);

    pub fn image_format(&self) -> ImageFormat {
        self.0
    }

    /// Canonical file extension, e.g. `jpg` for JPEG.
    pub fn extension(&self) -> &'static str {
        self.0.extensions_str().first().copied().unwrap_or("bin")
    }

    /// Mime type declared for uploads in this format.
    pub fn mime_type(&self) -> &'static str {
        self.0.to_mime_type()
    }
}

impl Default for UploadFormat {
    fn default() -> Self {
        Self::WEBP
    }
}

impl FromStr for UploadFormat {
    type Err = WordPressError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        ImageFormat::from_extension(&name)
            .filter(|format| is_uploadable(*format))
            .map(Self)
            .ok_or_else(|| WordPressError::UnsupportedFormat {
                format: s.to_string(),
            })
    }
}

/// Whether `format` has an encoder that accepts the layouts of [`prepare_for`].
///
/// OpenEXR and Radiance HDR encode float pixels and Farbfeld 16-bit ones.
fn is_uploadable(format: ImageFormat) -> bool {
    format.writing_enabled()
        && !matches!(
            format,
            ImageFormat::OpenExr | ImageFormat::Hdr | ImageFormat::Farbfeld
        )
}

impl fmt::Display for UploadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decodes `bytes` (any readable format) and re-encodes them as `format`.
pub fn convert_image(bytes: &[u8], format: UploadFormat) -> Result<Vec<u8>> {
    let source = image::guess_format(bytes).ok();
    let decoded = image::load_from_memory(bytes)?;
    let prepared = prepare_for(decoded, format.image_format());

    let mut encoded = Cursor::new(Vec::new());
    prepared.write_to(&mut encoded, format.image_format())?;
    let encoded = encoded.into_inner();

    debug!(
        "Converted {:?} image ({}) to {format} ({})",
        source,
        crate::utils::format_file_size(bytes.len() as u64),
        crate::utils::format_file_size(encoded.len() as u64)
    );
    Ok(encoded)
}

/// Reduces the pixel layout to one the target encoder accepts.
fn prepare_for(image: DynamicImage, target: ImageFormat) -> DynamicImage {
    match target {
        // No alpha channel in JPEG
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::Png | ImageFormat::Tiff => image,
        // Remaining encoders only take 8-bit layouts
        _ if image.color().has_alpha() => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

/// Downloads remote images and converts them for upload.
#[derive(Clone)]
pub struct ImageConverter {
    http: Arc<dyn HttpClient>,
    max_download_size: u64,
}

impl ImageConverter {
    pub fn new(http: Arc<dyn HttpClient>, max_download_size: u64) -> Self {
        Self {
            http,
            max_download_size,
        }
    }

    /// Downloads the image at `url` and re-encodes it as `format`.
    ///
    /// Any status other than 200 is an [`WordPressError::ImageDownload`].
    pub async fn download_and_convert(&self, url: &str, format: UploadFormat) -> Result<Vec<u8>> {
        info!("Downloading {url} for conversion to {format}");

        let download = self.http.download(url, self.max_download_size).await?;
        if download.status != 200 {
            return Err(WordPressError::ImageDownload {
                url: url.to_string(),
                status: download.status,
            });
        }

        let bytes = download.bytes;
        tokio::task::spawn_blocking(move || convert_image(&bytes, format))
            .await
            .map_err(|e| {
                WordPressError::Internal(anyhow::anyhow!("Image conversion task failed: {e}"))
            })?
    }
}

impl fmt::Debug for ImageConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageConverter")
            .field("max_download_size", &self.max_download_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::Download;
    use crate::mock::{Method, MockHttpClient};
    use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
    use serde_json::Value;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    /// A small translucent PNG.
    pub(crate) fn sample_png() -> Vec<u8> {
        let image = RgbaImage::from_pixel(4, 3, Rgba([200, 30, 30, 128]));
        encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
    }

    /// A small opaque JPEG.
    pub(crate) fn sample_jpeg() -> Vec<u8> {
        let image = RgbImage::from_pixel(4, 3, Rgb([30, 120, 200]));
        encode(DynamicImage::ImageRgb8(image), ImageFormat::Jpeg)
    }

    /// A small GIF.
    pub(crate) fn sample_gif() -> Vec<u8> {
        let image = RgbaImage::from_pixel(4, 3, Rgba([10, 200, 10, 255]));
        encode(DynamicImage::ImageRgba8(image), ImageFormat::Gif)
    }

    /// A 16-bit per channel PNG.
    fn sample_png16() -> Vec<u8> {
        let image = ImageBuffer::from_pixel(4, 3, Rgba([40_000u16, 1_000, 20_000, 65_535]));
        encode(DynamicImage::ImageRgba16(image), ImageFormat::Png)
    }

    #[test]
    fn test_upload_format_parsing() {
        let webp: UploadFormat = "webp".parse().unwrap();
        assert_eq!(webp, UploadFormat::WEBP);
        assert_eq!(webp.extension(), "webp");
        assert_eq!(webp.mime_type(), "image/webp");

        let jpeg: UploadFormat = "JPEG".parse().unwrap();
        assert_eq!(jpeg, "jpg".parse().unwrap());
        assert_eq!(jpeg.extension(), "jpg");
        assert_eq!(jpeg.mime_type(), "image/jpeg");

        assert_eq!(".png".parse::<UploadFormat>().unwrap().to_string(), "png");
        assert!(matches!(
            "docx".parse::<UploadFormat>(),
            Err(WordPressError::UnsupportedFormat { .. })
        ));
        assert_eq!(UploadFormat::default(), UploadFormat::WEBP);
    }

    #[test]
    fn test_convert_png_to_webp() {
        let webp = convert_image(&sample_png(), UploadFormat::WEBP).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
        assert_eq!(image::guess_format(&webp).unwrap(), ImageFormat::WebP);

        let decoded = image::load_from_memory(&webp).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn test_float_and_16_bit_only_formats_are_rejected() {
        for name in ["exr", "hdr", "ff"] {
            assert!(
                matches!(
                    name.parse::<UploadFormat>(),
                    Err(WordPressError::UnsupportedFormat { .. })
                ),
                "{name} should not be an upload format"
            );
        }
    }

    #[test]
    fn test_every_accepted_format_encodes() {
        let jpeg = sample_jpeg();
        for name in [
            "webp", "png", "jpg", "gif", "bmp", "tiff", "tga", "qoi", "ico", "pnm", "avif",
        ] {
            let format: UploadFormat = name.parse().unwrap();
            let converted = convert_image(&jpeg, format);
            assert!(converted.is_ok(), "{name}: {converted:?}");
        }
    }

    #[test]
    fn test_convert_any_source_to_webp() {
        for (name, source) in [
            ("jpeg", sample_jpeg()),
            ("gif", sample_gif()),
            ("16-bit png", sample_png16()),
        ] {
            let webp = convert_image(&source, UploadFormat::WEBP).unwrap();
            assert_eq!(&webp[8..12], b"WEBP", "{name}");
            let decoded = image::load_from_memory(&webp).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (4, 3), "{name}");
        }
    }

    #[test]
    fn test_convert_drops_alpha_for_jpeg() {
        let jpeg = convert_image(&sample_png(), "jpeg".parse().unwrap()).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_convert_rejects_garbage() {
        assert!(matches!(
            convert_image(b"definitely not an image", UploadFormat::WEBP),
            Err(WordPressError::Image(_))
        ));
    }

    #[tokio::test]
    async fn test_download_and_convert() {
        let png = sample_png();
        let mock = Arc::new(MockHttpClient::new(|_| Ok(Value::Null)).with_downloads(
            move |_| {
                Ok(Download {
                    status: 200,
                    bytes: png.clone(),
                })
            },
        ));
        let converter = ImageConverter::new(mock.clone(), 1024 * 1024);

        let webp = converter
            .download_and_convert("https://cdn.example.com/photo.png", UploadFormat::WEBP)
            .await
            .unwrap();
        assert_eq!(image::guess_format(&webp).unwrap(), ImageFormat::WebP);
        assert_eq!(mock.count(Method::Download, "/photo.png"), 1);
    }

    #[tokio::test]
    async fn test_download_failure_status() {
        let mock = Arc::new(MockHttpClient::new(|_| Ok(Value::Null)).with_downloads(|_| {
            Ok(Download {
                status: 404,
                bytes: b"not found".to_vec(),
            })
        }));
        let converter = ImageConverter::new(mock, 1024);

        match converter
            .download_and_convert("https://cdn.example.com/missing.png", UploadFormat::WEBP)
            .await
        {
            Err(WordPressError::ImageDownload { url, status }) => {
                assert_eq!(url, "https://cdn.example.com/missing.png");
                assert_eq!(status, 404);
            }
            other => panic!("Expected ImageDownload error, got {other:?}"),
        }
    }
}
