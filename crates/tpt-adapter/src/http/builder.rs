/*
[INPUT]:  Base URL, injected transport and request modifiers
[OUTPUT]: Fresh requests pre-stamped with every modifier
[POS]:    HTTP layer - immutable request factory with composable decoration
[UPDATE]: When changing path joining or modifier composition
*/

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use crate::http::{Request, Transport};

/// Mutates every request built by a [`RequestBuilder`]
pub trait Modifier: Send + Sync {
    /// Apply this modification and hand the request back
    fn modify(&self, request: Request) -> Request;
}

impl<F> Modifier for F
where
    F: Fn(Request) -> Request + Send + Sync,
{
    fn modify(&self, request: Request) -> Request {
        self(request)
    }
}

/// Static list of headers added to each request
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header entry. Repeated names are all sent.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }
}

impl Modifier for Headers {
    fn modify(&self, request: Request) -> Request {
        self.entries
            .iter()
            .fold(request, |request, (key, value)| request.add_header(key, value))
    }
}

/// Builds requests against one base URL through an ordered modifier list.
///
/// Builders are never mutated after construction: [`with_modifier`] returns a
/// new builder, so siblings derived from the same parent never see each
/// other's modifiers.
///
/// [`with_modifier`]: RequestBuilder::with_modifier
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: Url,
    transport: Arc<dyn Transport>,
    modifiers: Vec<Arc<dyn Modifier>>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url.as_str())
            .field("transport", &self.transport)
            .field("modifiers", &self.modifiers.len())
            .finish()
    }
}

impl RequestBuilder {
    /// Create a builder with no modifiers
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            transport,
            modifiers: Vec::new(),
        }
    }

    /// Derive a builder that also applies `modifier`, after the existing ones
    pub fn with_modifier(&self, modifier: impl Modifier + 'static) -> Self {
        let mut modifiers = self.modifiers.clone();
        modifiers.push(Arc::new(modifier));
        Self {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
            modifiers,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// Base URL with `path` joined onto its path
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = join_path(url.path(), path);
        url.set_path(&joined);
        url
    }

    /// Start a GET request for `path` below the base URL.
    ///
    /// `path` is a path only; use [`Request::add_query`] for parameters.
    pub fn new_request(&self, path: &str) -> Request {
        let request = Request::new(Arc::clone(&self.transport), self.url_for(path));
        self.modifiers
            .iter()
            .fold(request, |request, modifier| modifier.modify(request))
    }
}

/// Join two URL paths, dropping empty and `.` segments and resolving `..`
fn join_path(base: &str, path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
