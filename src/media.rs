//! Media sources, metadata and upload file preparation.

use crate::convert::{ImageConverter, UploadFormat};
use crate::error::{Result, WordPressError};
use crate::http::MediaFile;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where the bytes of a media upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Downloaded and re-encoded before upload
    Remote(String),
    /// Uploaded as-is
    Local(PathBuf),
}

impl MediaSource {
    /// Classifies a URL-or-path string; anything starting with `http` is remote.
    pub fn parse(source: &str) -> Self {
        if crate::utils::is_remote_source(source) {
            MediaSource::Remote(source.to_string())
        } else {
            MediaSource::Local(PathBuf::from(source))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, MediaSource::Remote(_))
    }
}

impl From<&str> for MediaSource {
    fn from(source: &str) -> Self {
        MediaSource::parse(source)
    }
}

impl From<String> for MediaSource {
    fn from(source: String) -> Self {
        MediaSource::parse(&source)
    }
}

impl From<&Path> for MediaSource {
    fn from(path: &Path) -> Self {
        MediaSource::Local(path.to_path_buf())
    }
}

impl From<PathBuf> for MediaSource {
    fn from(path: PathBuf) -> Self {
        MediaSource::Local(path)
    }
}

/// Descriptive fields sent with a media upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaMetadata {
    pub slug: String,
    pub title: String,
    pub alt_text: String,
    pub description: String,
    pub caption: String,
}

impl MediaMetadata {
    /// Creates metadata with an empty caption.
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        alt_text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            alt_text: alt_text.into(),
            description: description.into(),
            caption: String::new(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Text parts of the multipart upload.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("alt_text", self.alt_text.clone()),
            ("slug", self.slug.clone()),
            ("caption", self.caption.clone()),
            ("description", self.description.clone()),
        ]
    }
}

/// Produces the file part of an upload.
///
/// Remote images are downloaded and re-encoded as `format` and named after
/// the slug. Local files keep their bytes and base name; only the declared
/// mime type follows `format`.
pub async fn prepare_media_file(
    source: &MediaSource,
    metadata: &MediaMetadata,
    format: UploadFormat,
    converter: &ImageConverter,
) -> Result<MediaFile> {
    match source {
        MediaSource::Remote(url) => {
            let bytes = converter.download_and_convert(url, format).await?;
            Ok(MediaFile {
                file_name: crate::utils::media_file_name(&metadata.slug, format.extension()),
                mime_type: format.mime_type().to_string(),
                bytes,
            })
        }
        MediaSource::Local(path) => {
            let bytes = read_local_file(path).await?;
            let file_name = path
                .file_name()
                .map(|name| crate::utils::sanitize_filename(&name.to_string_lossy()))
                .ok_or_else(|| {
                    WordPressError::file_error(path.display().to_string(), "path has no file name")
                })?;
            Ok(MediaFile {
                file_name,
                mime_type: format.mime_type().to_string(),
                bytes,
            })
        }
    }
}

/// Loads a local file, distinguishing a missing file from other read errors.
async fn read_local_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WordPressError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => WordPressError::file_error(path.display().to_string(), e.to_string()),
    })
}
