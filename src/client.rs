//! The public WordPress client.
//!
//! Every request method is fail-soft: failures are logged and reported as
//! `None`. The only exception is media preparation in
//! [`WordPressClient::upload_media`], whose download/convert/read errors are
//! returned as `Err` because they happen before any request is made.

use crate::config::Config;
use crate::convert::{ImageConverter, UploadFormat};
use crate::endpoint::Endpoints;
use crate::error::{ErrorSeverity, Result};
use crate::http::WpHttpClient;
use crate::media::{MediaMetadata, MediaSource, prepare_media_file};
use crate::post::{NewPost, PostStatus};
use crate::taxonomy::{self, Taxonomy, TermRef};
use crate::traits::HttpClient;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Default page size of [`WordPressClient::list_posts`].
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Default page of [`WordPressClient::list_posts`].
pub const DEFAULT_PAGE: u32 = 1;

/// WordPress REST client bound to one site and one set of credentials.
#[derive(Clone)]
pub struct WordPressClient {
    http: Arc<dyn HttpClient>,
    endpoints: Endpoints,
    converter: ImageConverter,
    default_format: UploadFormat,
}

impl WordPressClient {
    /// Creates a client for `site_url` authenticating as `username`.
    pub fn new(
        site_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(Config::for_site(site_url, username, password))
    }

    /// Creates a client from `WORDPRESS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(Config::from_env()?)
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let http = Arc::new(WpHttpClient::with_config(&config)?);
        Self::with_http_client(&config, http)
    }

    /// Creates a client on top of an arbitrary transport.
    pub fn with_http_client(config: &Config, http: Arc<dyn HttpClient>) -> Result<Self> {
        config.validate()?;
        let endpoints = Endpoints::new(&config.site.site_url)?;
        let default_format = config.media.default_format.parse()?;
        let converter = ImageConverter::new(Arc::clone(&http), config.media.max_download_size);

        info!("WordPress client ready for {}", config.site.site_url);
        Ok(Self {
            http,
            endpoints,
            converter,
            default_format,
        })
    }

    /// REST endpoints of the configured site.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Creates a post, resolving category and tag names to ids first.
    ///
    /// Names without a match are created. If any resolution fails the post
    /// is not sent.
    pub async fn create_post(&self, post: &NewPost) -> Option<Value> {
        soften(
            &format!("create post {:?}", post.slug),
            self.try_create_post(post).await,
        )
    }

    async fn try_create_post(&self, post: &NewPost) -> Result<Value> {
        info!(
            "Creating post {:?} with {} categories and {} tags",
            post.slug,
            post.categories.len(),
            post.tags.len()
        );

        let http = self.http.as_ref();
        let categories =
            taxonomy::resolve_terms(http, &self.endpoints, Taxonomy::Category, &post.categories)
                .await?;
        let tags = taxonomy::resolve_terms(http, &self.endpoints, Taxonomy::Tag, &post.tags).await?;

        let body = serde_json::to_value(post.payload(categories, tags))?;
        let created = http.post_json(&self.endpoints.posts()?, &body).await?;

        let id = created.get("id").cloned().unwrap_or_default();
        info!("Successfully created post {:?} (id: {id})", post.slug);
        Ok(created)
    }

    /// Uploads media in the configured default format (webp unless changed).
    pub async fn upload_media(
        &self,
        source: impl Into<MediaSource>,
        metadata: &MediaMetadata,
    ) -> Result<Option<Value>> {
        self.upload_media_as(source, metadata, self.default_format)
            .await
    }

    /// Uploads media, converting remote images to `format` first.
    ///
    /// Returns `Err` when the remote image cannot be fetched or converted, or
    /// the local file cannot be read; `Ok(None)` when the upload request fails.
    pub async fn upload_media_as(
        &self,
        source: impl Into<MediaSource>,
        metadata: &MediaMetadata,
        format: UploadFormat,
    ) -> Result<Option<Value>> {
        let source = source.into();
        let file = prepare_media_file(&source, metadata, format, &self.converter).await?;
        let url = self.endpoints.media()?;

        info!("Uploading media {:?} as {}", metadata.slug, file.file_name);
        Ok(soften(
            &format!("upload media {:?}", metadata.slug),
            self.http
                .upload_file(&url, file, metadata.form_fields())
                .await,
        ))
    }

    /// Sets the status of an existing post.
    pub async fn change_post_status(&self, post_id: u64, status: PostStatus) -> Option<Value> {
        info!("Changing status of post {post_id} to {status}");
        let result = match self.endpoints.post(post_id) {
            Ok(url) => self.http.post_json(&url, &json!({ "status": status })).await,
            Err(e) => Err(e),
        };
        soften(&format!("change status of post {post_id}"), result)
    }

    /// Deletes a post. WordPress moves it to the trash.
    pub async fn delete_post(&self, post_id: u64) -> Option<Value> {
        info!("Deleting post {post_id}");
        let result = match self.endpoints.post(post_id) {
            Ok(url) => self.http.delete(&url).await,
            Err(e) => Err(e),
        };
        soften(&format!("delete post {post_id}"), result)
    }

    /// Lists one page of posts.
    pub async fn list_posts(&self, per_page: u32, page: u32) -> Option<Value> {
        let result = match self.endpoints.posts_page(per_page, page) {
            Ok(url) => self.http.get_json(&url).await,
            Err(e) => Err(e),
        };
        soften(&format!("list posts (page {page}, {per_page} per page)"), result)
    }

    /// Creates a category unconditionally.
    pub async fn add_category(&self, name: &str) -> Option<Value> {
        self.add_term(Taxonomy::Category, name).await
    }

    /// Creates a tag unconditionally.
    pub async fn add_tag(&self, name: &str) -> Option<Value> {
        self.add_term(Taxonomy::Tag, name).await
    }

    /// Returns the id of the first category matching `name`.
    pub async fn find_category(&self, name: &str) -> Option<u64> {
        self.find_term(Taxonomy::Category, name).await
    }

    /// Returns the id of the first tag matching `name`.
    pub async fn find_tag(&self, name: &str) -> Option<u64> {
        self.find_term(Taxonomy::Tag, name).await
    }

    /// Resolves a category reference to an id, creating the category if needed.
    pub async fn ensure_category(&self, term: impl Into<TermRef>) -> Option<u64> {
        self.ensure_term(Taxonomy::Category, term.into()).await
    }

    /// Resolves a tag reference to an id, creating the tag if needed.
    pub async fn ensure_tag(&self, term: impl Into<TermRef>) -> Option<u64> {
        self.ensure_term(Taxonomy::Tag, term.into()).await
    }

    async fn add_term(&self, taxonomy: Taxonomy, name: &str) -> Option<Value> {
        soften(
            &format!("add {taxonomy} {name:?}"),
            taxonomy::add_term(self.http.as_ref(), &self.endpoints, taxonomy, name).await,
        )
    }

    async fn find_term(&self, taxonomy: Taxonomy, name: &str) -> Option<u64> {
        soften(
            &format!("find {taxonomy} {name:?}"),
            taxonomy::find_term(self.http.as_ref(), &self.endpoints, taxonomy, name).await,
        )
        .flatten()
    }

    async fn ensure_term(&self, taxonomy: Taxonomy, term: TermRef) -> Option<u64> {
        soften(
            &format!("resolve {taxonomy} {term}"),
            taxonomy::ensure_term(self.http.as_ref(), &self.endpoints, taxonomy, &term).await,
        )
    }
}

impl fmt::Debug for WordPressClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPressClient")
            .field("endpoints", &self.endpoints)
            .field("default_format", &self.default_format)
            .finish_non_exhaustive()
    }
}

/// Logs a failed operation at its severity and drops the error.
fn soften<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            match e.severity() {
                ErrorSeverity::Warning => warn!("Failed to {operation}: {e}"),
                ErrorSeverity::Error => error!("Failed to {operation}: {e}"),
                ErrorSeverity::Critical => {
                    error!("[{}] Failed to {operation}: {e}", ErrorSeverity::Critical)
                }
            }
            None
        }
    }
}
