//! # WordPress REST Rust SDK
//!
//! A small WordPress client for publishing posts and media over the REST API v2.
//!
//! ## Features
//!
//! - **Posts**: create, change status, delete and list posts
//! - **Categories & tags**: search, create, and resolve names to ids on the fly
//! - **Media**: upload local files, or download remote images and re-encode
//!   them (webp by default) before upload
//! - **Fail-soft**: request failures are logged and returned as `None`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wordpress_pub_rs::{MediaMetadata, NewPost, Result, WordPressClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let wp = WordPressClient::new("https://blog.example.com", "editor", "app-password")?;
//!
//!     let media = wp
//!         .upload_media(
//!             "https://images.example.com/cover.jpg",
//!             &MediaMetadata::new("cover-image", "Cover", "Cover image", "Post cover"),
//!         )
//!         .await?;
//!     let media_id = media.and_then(|m| m["id"].as_u64());
//!
//!     let mut post = NewPost::new("Hello", "<p>First post</p>", "hello")
//!         .with_categories(["news"])
//!         .with_tags(["rust", "wordpress"]);
//!     if let Some(id) = media_id {
//!         post = post.with_featured_media(id);
//!     }
//!
//!     if let Some(created) = wp.create_post(&post).await {
//!         println!("Created post {}", created["id"]);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod convert;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod media;
pub mod post;
pub mod taxonomy;
pub mod traits;
pub mod utils;

#[cfg(test)]
pub(crate) mod mock;

// Re-export main types for convenience
pub use client::{DEFAULT_PAGE, DEFAULT_PER_PAGE, WordPressClient};
pub use config::Config;
pub use convert::UploadFormat;
pub use error::{Result, WordPressError};
pub use media::{MediaMetadata, MediaSource};
pub use post::{CommentStatus, NewPost, PostStatus};
pub use taxonomy::{Taxonomy, TermRef};
pub use traits::HttpClient;
