//! Categories and tags: search, creation and id resolution.
//!
//! The functions here take the transport and the site endpoints explicitly,
//! so id resolution does not depend on a [`WordPressClient`](crate::WordPressClient)
//! or any process-wide configuration.
//!
//! Resolution is not synchronized. Two callers ensuring the same new name at
//! the same time can both miss the search and both try to create it.
//! WordPress rejects the second create with `term_exists`, in which case the
//! existing id from the error is used.

use crate::endpoint::Endpoints;
use crate::error::{Result, WordPressError};
use crate::traits::HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use tracing::{debug, info, warn};

/// The two flat term collections a post can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    Category,
    Tag,
}

impl Taxonomy {
    /// REST resource name of the collection.
    pub fn resource(&self) -> &'static str {
        match self {
            Taxonomy::Category => "categories",
            Taxonomy::Tag => "tags",
        }
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Taxonomy::Category => write!(f, "category"),
            Taxonomy::Tag => write!(f, "tag"),
        }
    }
}

/// A category or tag reference: either an id or a name still to be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermRef {
    Id(u64),
    Name(String),
}

impl From<u64> for TermRef {
    fn from(id: u64) -> Self {
        TermRef::Id(id)
    }
}

impl From<&str> for TermRef {
    fn from(name: &str) -> Self {
        TermRef::Name(name.to_string())
    }
}

impl From<String> for TermRef {
    fn from(name: String) -> Self {
        TermRef::Name(name)
    }
}

impl fmt::Display for TermRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermRef::Id(id) => write!(f, "#{id}"),
            TermRef::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// Reads the integer `id` of a REST object.
pub fn extract_id(value: &Value) -> Result<u64> {
    value
        .get("id")
        .and_then(Value::as_u64)
        .ok_or(WordPressError::MissingField { field: "id" })
}

/// Searches the taxonomy by name and returns the id of the first match.
///
/// An empty result, or a body that is not a JSON array, is a miss.
pub async fn find_term(
    http: &dyn HttpClient,
    endpoints: &Endpoints,
    taxonomy: Taxonomy,
    name: &str,
) -> Result<Option<u64>> {
    let response = http.get_json(&endpoints.term_search(taxonomy, name)?).await?;

    let id = match response.as_array().and_then(|matches| matches.first()) {
        Some(first) => Some(extract_id(first)?),
        None => None,
    };
    debug!("Search for {taxonomy} {name:?} -> {id:?}");
    Ok(id)
}

/// Creates a term unconditionally and returns the created object.
pub async fn add_term(
    http: &dyn HttpClient,
    endpoints: &Endpoints,
    taxonomy: Taxonomy,
    name: &str,
) -> Result<Value> {
    info!("Creating {taxonomy} {name:?}");
    http.post_json(&endpoints.terms(taxonomy)?, &json!({ "name": name }))
        .await
}

/// Resolves a reference to an id, creating the term when no match exists.
///
/// Issues no request for an id, one search for a known name, and a search
/// followed by a create for a new name.
pub async fn ensure_term(
    http: &dyn HttpClient,
    endpoints: &Endpoints,
    taxonomy: Taxonomy,
    term: &TermRef,
) -> Result<u64> {
    let name = match term {
        TermRef::Id(id) => return Ok(*id),
        TermRef::Name(name) => name,
    };

    if let Some(id) = find_term(http, endpoints, taxonomy, name).await? {
        return Ok(id);
    }

    match add_term(http, endpoints, taxonomy, name).await {
        Ok(created) => {
            let id = extract_id(&created)?;
            info!("Created {taxonomy} {name:?} with id {id}");
            Ok(id)
        }
        Err(e) => match e.existing_term_id() {
            Some(id) => {
                warn!("{taxonomy} {name:?} was created concurrently, using existing id {id}");
                Ok(id)
            }
            None => Err(e),
        },
    }
}

/// Resolves every reference in order, stopping at the first failure.
pub async fn resolve_terms(
    http: &dyn HttpClient,
    endpoints: &Endpoints,
    taxonomy: Taxonomy,
    terms: &[TermRef],
) -> Result<Vec<u64>> {
    let mut ids = Vec::with_capacity(terms.len());
    for term in terms {
        ids.push(ensure_term(http, endpoints, taxonomy, term).await?);
    }
    Ok(ids)
}
