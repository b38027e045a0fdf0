//! URL construction for the WordPress REST API v2.

use crate::error::Result;
use crate::taxonomy::Taxonomy;
use url::Url;

/// Path prefix of every REST v2 route.
pub const API_PREFIX: &str = "/wp-json/wp/v2";

/// Builds the REST v2 URLs of one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    root: String,
}

impl Endpoints {
    /// Creates the endpoints for a site base URL such as `https://blog.example.com`.
    ///
    /// The URL is parsed up front so later calls cannot fail on a malformed base.
    pub fn new(site_url: &str) -> Result<Self> {
        let root = format!("{}{}", site_url.trim_end_matches('/'), API_PREFIX);
        Url::parse(&root)?;
        Ok(Self { root })
    }

    /// `/posts`
    pub fn posts(&self) -> Result<Url> {
        self.route("posts")
    }

    /// `/posts/{id}`
    pub fn post(&self, post_id: u64) -> Result<Url> {
        self.route(&format!("posts/{post_id}"))
    }

    /// `/posts?per_page={per_page}&page={page}`
    pub fn posts_page(&self, per_page: u32, page: u32) -> Result<Url> {
        let mut url = self.posts()?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// `/media`
    pub fn media(&self) -> Result<Url> {
        self.route("media")
    }

    /// `/categories` or `/tags`
    pub fn terms(&self, taxonomy: Taxonomy) -> Result<Url> {
        self.route(taxonomy.resource())
    }

    /// `/categories?search={name}` or `/tags?search={name}`, with the name
    /// percent-encoded.
    pub fn term_search(&self, taxonomy: Taxonomy, name: &str) -> Result<Url> {
        let mut url = self.terms(taxonomy)?;
        url.query_pairs_mut().append_pair("search", name);
        Ok(url)
    }

    fn route(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.root, path))?)
    }
}
