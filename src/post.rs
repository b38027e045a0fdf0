//! Post model and payload construction.

use crate::error::WordPressError;
use crate::taxonomy::TermRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
    Pending,
    Private,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = WordPressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "publish" => Ok(PostStatus::Publish),
            "draft" => Ok(PostStatus::Draft),
            "pending" => Ok(PostStatus::Pending),
            "private" => Ok(PostStatus::Private),
            other => Err(WordPressError::config_error(format!(
                "Unknown post status: {other}"
            ))),
        }
    }
}

/// Whether comments or pingbacks are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Open,
    #[default]
    Closed,
}

impl From<bool> for CommentStatus {
    fn from(open: bool) -> Self {
        if open {
            CommentStatus::Open
        } else {
            CommentStatus::Closed
        }
    }
}

/// A post to be created, with categories and tags not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: PostStatus,
    /// Media id of the featured image
    pub featured_media: Option<u64>,
    pub categories: Vec<TermRef>,
    pub tags: Vec<TermRef>,
    pub comment_status: CommentStatus,
    pub ping_status: CommentStatus,
}

impl NewPost {
    /// Creates a published post with comments and pings closed.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            slug: slug.into(),
            status: PostStatus::Publish,
            featured_media: None,
            categories: Vec::new(),
            tags: Vec::new(),
            comment_status: CommentStatus::Closed,
            ping_status: CommentStatus::Closed,
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_featured_media(mut self, media_id: u64) -> Self {
        self.featured_media = Some(media_id);
        self
    }

    pub fn with_categories<I, T>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermRef>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermRef>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets comment and pingback settings.
    pub fn with_comments(mut self, comments_open: bool, pings_open: bool) -> Self {
        self.comment_status = comments_open.into();
        self.ping_status = pings_open.into();
        self
    }

    /// Builds the request body once every term has been resolved to an id.
    pub fn payload(&self, categories: Vec<u64>, tags: Vec<u64>) -> PostPayload<'_> {
        PostPayload {
            title: &self.title,
            content: &self.content,
            slug: &self.slug,
            status: self.status,
            featured_media: self.featured_media,
            comment_status: self.comment_status,
            ping_status: self.ping_status,
            categories,
            tags,
        }
    }
}

/// Body of `POST /posts`. Term lists only ever hold ids.
#[derive(Debug, Serialize)]
pub struct PostPayload<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub slug: &'a str,
    pub status: PostStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
    pub comment_status: CommentStatus,
    pub ping_status: CommentStatus,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_defaults() {
        let post = NewPost::new("Hello", "<p>World</p>", "hello-world");
        assert_eq!(post.status, PostStatus::Publish);
        assert_eq!(post.comment_status, CommentStatus::Closed);
        assert_eq!(post.ping_status, CommentStatus::Closed);
        assert!(post.categories.is_empty());
        assert!(post.featured_media.is_none());
    }

    #[test]
    fn test_post_builder_methods() {
        let post = NewPost::new("Hello", "Body", "hello")
            .with_status(PostStatus::Draft)
            .with_featured_media(9)
            .with_categories(["news", "rust"])
            .with_tags(vec![TermRef::Id(4), "async".into()])
            .with_comments(true, false);

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.featured_media, Some(9));
        assert_eq!(post.categories, vec![TermRef::from("news"), TermRef::from("rust")]);
        assert_eq!(post.tags, vec![TermRef::Id(4), TermRef::from("async")]);
        assert_eq!(post.comment_status, CommentStatus::Open);
        assert_eq!(post.ping_status, CommentStatus::Closed);
    }

    #[test]
    fn test_payload_serialization() {
        let post = NewPost::new("Hello", "Body", "hello").with_featured_media(9);
        let payload = serde_json::to_value(post.payload(vec![1, 2], vec![])).unwrap();
        assert_eq!(
            payload,
            json!({
                "title": "Hello",
                "content": "Body",
                "slug": "hello",
                "status": "publish",
                "featured_media": 9,
                "comment_status": "closed",
                "ping_status": "closed",
                "categories": [1, 2],
                "tags": [],
            })
        );

        let without_media = NewPost::new("Hello", "Body", "hello");
        let payload = serde_json::to_value(without_media.payload(vec![], vec![])).unwrap();
        assert!(payload.get("featured_media").is_none());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert_eq!("Private".parse::<PostStatus>().unwrap(), PostStatus::Private);
        assert!("archived".parse::<PostStatus>().is_err());
        assert_eq!(PostStatus::Pending.to_string(), "pending");
    }
}
