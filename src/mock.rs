//! Scripted [`HttpClient`] used by the unit tests.

use crate::error::{Result, WordPressError};
use crate::http::{Download, MediaFile};
use crate::traits::HttpClient;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Delete,
    Upload,
    Download,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
    pub file: Option<MediaFile>,
    pub fields: Vec<(&'static str, String)>,
}

impl RecordedCall {
    fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            file: None,
            fields: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

type Responder = Box<dyn Fn(&RecordedCall) -> Result<Value> + Send + Sync>;
type Downloader = Box<dyn Fn(&str) -> Result<Download> + Send + Sync>;

pub(crate) struct MockHttpClient {
    calls: Mutex<Vec<RecordedCall>>,
    responder: Responder,
    downloader: Downloader,
}

impl MockHttpClient {
    pub fn new(responder: impl Fn(&RecordedCall) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            downloader: Box::new(|url| {
                Err(WordPressError::Internal(anyhow::anyhow!(
                    "no download scripted for {url}"
                )))
            }),
        }
    }

    pub fn with_downloads(
        mut self,
        downloader: impl Fn(&str) -> Result<Download> + Send + Sync + 'static,
    ) -> Self {
        self.downloader = Box::new(downloader);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls with `method` whose path ends with `suffix`.
    pub fn count(&self, method: Method, suffix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == method && call.path().ends_with(suffix))
            .count()
    }

    fn respond(&self, call: RecordedCall) -> Result<Value> {
        let result = (self.responder)(&call);
        self.calls.lock().unwrap().push(call);
        result
    }
}

/// Error a real transport would produce for a non-2xx answer.
pub(crate) fn server_error(status: u16) -> WordPressError {
    WordPressError::from_api_response(
        status,
        r#"{"code":"mock_error","message":"simulated failure"}"#,
    )
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        self.respond(RecordedCall::new(Method::Get, url.clone()))
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value> {
        let mut call = RecordedCall::new(Method::Post, url.clone());
        call.body = Some(body.clone());
        self.respond(call)
    }

    async fn delete(&self, url: &Url) -> Result<Value> {
        self.respond(RecordedCall::new(Method::Delete, url.clone()))
    }

    async fn upload_file(
        &self,
        url: &Url,
        file: MediaFile,
        fields: Vec<(&'static str, String)>,
    ) -> Result<Value> {
        let mut call = RecordedCall::new(Method::Upload, url.clone());
        call.file = Some(file);
        call.fields = fields;
        self.respond(call)
    }

    async fn download(&self, url: &str, _max_size: u64) -> Result<Download> {
        let parsed = Url::parse(url)?;
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::new(Method::Download, parsed));
        (self.downloader)(url)
    }
}
