//! HTTP client module for the WordPress REST API.
//!
//! This module provides the reqwest-backed transport with:
//! - HTTP Basic Authentication on every API request
//! - Optional timeout configuration
//! - Upload size validation
//! - Size-limited, unauthenticated downloads for remote images

use crate::config::{Config, MediaConfig, SiteConfig};
use crate::error::{Result, WordPressError};
use crate::traits::HttpClient;
use reqwest::{Client, RequestBuilder, Response, multipart};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// HTTP client wrapper for WordPress REST calls.
#[derive(Debug, Clone)]
pub struct WpHttpClient {
    client: Client,
    site: SiteConfig,
    media: MediaConfig,
}

/// A file ready to be sent as the `file` part of a media upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Raw result of an unauthenticated download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl WpHttpClient {
    /// Creates a new client with the given configuration.
    pub fn with_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.http.user_agent);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            site: config.site.clone(),
            media: config.media.clone(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.site.username, Some(&self.site.password))
    }

    /// Sends an authenticated request and parses the response.
    async fn execute(&self, request: RequestBuilder) -> Result<Value> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(transport_error)?;
        parse_response(response).await
    }

    /// Downloads content from a URL with size limits and streaming.
    ///
    /// The body of a response other than 200 is not read; only its status is
    /// returned.
    pub async fn download_with_limit(&self, url: &str, max_size: u64) -> Result<Download> {
        use futures::StreamExt;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        if status != 200 {
            debug!("Download of {url} answered {status}, skipping body");
            return Ok(Download {
                status,
                bytes: Vec::new(),
            });
        }

        // Check content length if available
        if let Some(content_length) = response.content_length() {
            if content_length > max_size {
                return Err(WordPressError::ImageTooLarge {
                    url: url.to_string(),
                    reason: format!(
                        "Content too large: {content_length} bytes (max: {max_size} bytes)"
                    ),
                });
            }
        }

        let mut downloaded_size = 0u64;
        let mut data = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(transport_error)?;
            downloaded_size += chunk.len() as u64;

            if downloaded_size > max_size {
                return Err(WordPressError::ImageTooLarge {
                    url: url.to_string(),
                    reason: format!(
                        "Content too large during download: {downloaded_size} bytes (max: {max_size} bytes)"
                    ),
                });
            }

            data.extend_from_slice(&chunk);
        }

        debug!("Downloaded {downloaded_size} bytes from {url} (status {status})");
        Ok(Download {
            status,
            bytes: data,
        })
    }
}

#[async_trait::async_trait]
impl HttpClient for WpHttpClient {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        debug!("GET {url}");
        self.execute(self.client.get(url.clone())).await
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value> {
        debug!("POST {url}");
        self.execute(self.client.post(url.clone()).json(body)).await
    }

    async fn delete(&self, url: &Url) -> Result<Value> {
        debug!("DELETE {url}");
        self.execute(self.client.delete(url.clone())).await
    }

    async fn upload_file(
        &self,
        url: &Url,
        file: MediaFile,
        fields: Vec<(&'static str, String)>,
    ) -> Result<Value> {
        crate::utils::validate_file_size(
            file.bytes.len() as u64,
            self.media.max_upload_size,
            "upload",
        )
        .map_err(WordPressError::config_error)?;

        debug!(
            "Uploading {} ({}, {}) to {url}",
            file.file_name,
            file.mime_type,
            crate::utils::format_file_size(file.bytes.len() as u64)
        );

        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)?;
        let form = fields
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            })
            .part("file", part);

        self.execute(self.client.post(url.clone()).multipart(form))
            .await
    }

    async fn download(&self, url: &str, max_size: u64) -> Result<Download> {
        self.download_with_limit(url, max_size).await
    }
}

fn transport_error(error: reqwest::Error) -> WordPressError {
    if error.is_timeout() {
        WordPressError::Timeout
    } else {
        WordPressError::Network(error)
    }
}

/// Converts a response into JSON, mapping non-2xx statuses to API errors.
///
/// An empty 2xx body parses as `Value::Null`.
async fn parse_response(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(WordPressError::from_api_response(
            status.as_u16(),
            &String::from_utf8_lossy(&body),
        ));
    }

    if body.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&body)?)
}
