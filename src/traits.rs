//! Trait abstractions for the WordPress REST SDK.
//!
//! [`HttpClient`] is the transport seam: the client, the id-resolution helpers
//! and the image converter only talk to the network through it, so tests can
//! inject a scripted implementation instead of [`WpHttpClient`](crate::http::WpHttpClient).

use crate::error::Result;
use crate::http::{Download, MediaFile};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Trait for HTTP client operations against the REST API.
///
/// Every method except [`download`](HttpClient::download) sends the site
/// credentials and fails with [`WordPressError::Api`](crate::WordPressError::Api)
/// on a non-2xx status.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Makes an authenticated GET request and parses the JSON body.
    async fn get_json(&self, url: &Url) -> Result<Value>;

    /// Makes an authenticated POST request with a JSON body.
    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value>;

    /// Makes an authenticated DELETE request.
    async fn delete(&self, url: &Url) -> Result<Value>;

    /// Uploads a file as multipart form data, alongside plain text fields.
    async fn upload_file(
        &self,
        url: &Url,
        file: MediaFile,
        fields: Vec<(&'static str, String)>,
    ) -> Result<Value>;

    /// Downloads content without credentials, refusing bodies above `max_size`.
    ///
    /// The status is returned rather than checked; callers decide which
    /// statuses are acceptable. Bodies are only read for a 200 response.
    async fn download(&self, url: &str, max_size: u64) -> Result<Download>;
}
