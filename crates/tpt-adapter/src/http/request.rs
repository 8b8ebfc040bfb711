/*
[INPUT]:  Base URL, modifiers and chained request edits (query, headers, body)
[OUTPUT]: Raw responses, decoded JSON values or response text
[POS]:    HTTP layer - single-use chainable request with deferred errors
[UPDATE]: When adding chain methods or terminal operations
*/

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::{Result, TptError, Transport};

const APPLICATION_JSON: &str = "application/json";

/// A request under construction.
///
/// Chain methods never fail. The first error raised along the chain is kept,
/// every later chain call becomes a no-op, and the terminal call returns that
/// error without touching the network.
#[derive(Debug)]
pub struct Request {
    transport: Arc<dyn Transport>,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    first_error: Option<TptError>,
}

impl Request {
    pub(crate) fn new(transport: Arc<dyn Transport>, url: Url) -> Self {
        Self {
            transport,
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
            first_error: None,
        }
    }

    /// Current HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL including query parameters
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers added so far
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Pending request body, if any
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The error recorded along the chain, if any
    pub fn error(&self) -> Option<&TptError> {
        self.first_error.as_ref()
    }

    fn record(&mut self, err: TptError) {
        if self.first_error.is_none() {
            self.first_error = Some(err);
        }
    }

    /// Append a query parameter. Existing values for the key are kept.
    pub fn add_query(mut self, key: &str, value: &str) -> Self {
        if self.first_error.is_none() {
            self.url.query_pairs_mut().append_pair(key, value);
        }
        self
    }

    /// Append a header. Existing values for the name are kept.
    pub fn add_header(self, key: &str, value: &str) -> Self {
        self.append_header(key, value, false)
    }

    /// Append a header whose value is masked in `Debug` output
    pub fn add_sensitive_header(self, key: &str, value: &str) -> Self {
        self.append_header(key, value, true)
    }

    fn append_header(mut self, key: &str, value: &str, sensitive: bool) -> Self {
        if self.first_error.is_some() {
            return self;
        }

        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(err) => {
                self.record(TptError::InvalidHeader {
                    name: key.to_string(),
                    reason: err.to_string(),
                });
                return self;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(mut value) => {
                value.set_sensitive(sensitive);
                self.headers.append(name, value);
            }
            Err(err) => self.record(TptError::InvalidHeader {
                name: key.to_string(),
                reason: err.to_string(),
            }),
        }
        self
    }

    /// POST the JSON encoding of `body` with `Content-Type: application/json`
    pub fn post_json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        self.json_body(Method::POST, body)
    }

    /// PATCH the JSON encoding of `body` with `Content-Type: application/json`
    pub fn patch_json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        self.json_body(Method::PATCH, body)
    }

    /// POST a raw body
    pub fn post(self, body: impl Into<Vec<u8>>) -> Self {
        self.raw_body(Method::POST, body.into())
    }

    /// PATCH a raw body
    pub fn patch(self, body: impl Into<Vec<u8>>) -> Self {
        self.raw_body(Method::PATCH, body.into())
    }

    /// Switch the method to DELETE
    pub fn delete(mut self) -> Self {
        if self.first_error.is_none() {
            self.method = Method::DELETE;
        }
        self
    }

    fn json_body<T: Serialize + ?Sized>(mut self, method: Method, body: &T) -> Self {
        if self.first_error.is_some() {
            return self;
        }

        self.method = method;
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                self.headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                self.body = Some(bytes);
            }
            Err(err) => self.record(TptError::Encode(err)),
        }
        self
    }

    fn raw_body(mut self, method: Method, body: Vec<u8>) -> Self {
        if self.first_error.is_none() {
            self.method = method;
            self.body = Some(body);
        }
        self
    }

    fn accept_json(mut self) -> Self {
        if self.first_error.is_none() {
            self.headers
                .append(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        }
        self
    }

    /// Execute the request and hand back the response untouched.
    ///
    /// Returns the recorded chain error, if any, without performing I/O.
    pub async fn raw_response(self) -> Result<Response> {
        let Request {
            transport,
            method,
            url,
            headers,
            body,
            first_error,
        } = self;

        if let Some(err) = first_error {
            return Err(err);
        }

        let mut request = reqwest::Request::new(method.clone(), url);
        *request.headers_mut() = headers;
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }

        let response = transport.execute(request).await?;
        debug!(
            method = %method,
            url = %response.url(),
            status = %response.status(),
            "API request"
        );
        Ok(response)
    }

    /// Execute the request and decode a JSON response body.
    ///
    /// Anything other than `200 OK` is an API error carrying the status text.
    pub async fn decode_into<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.accept_json().raw_response().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TptError::api_error(
                status,
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(TptError::Decode)
    }

    /// Execute the request and return the body as text, whatever the status
    pub async fn as_string(self) -> Result<String> {
        let response = self.accept_json().raw_response().await?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde::{Deserialize, Serializer};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::RequestBuilder;

    #[derive(Debug, Default)]
    struct CountingTransport {
        inner: reqwest::Client,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn execute(&self, request: reqwest::Request) -> Result<Response> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.inner.execute(request).await?)
        }
    }

    struct WontEncode;

    impl Serialize for WontEncode {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("ERROR 12345"))
        }
    }

    #[derive(Debug, Deserialize)]
    struct KeyValue {
        key: String,
    }

    fn local_builder() -> RequestBuilder {
        let base = Url::parse("http://localhost:1234/base").unwrap();
        RequestBuilder::new(base, Arc::new(reqwest::Client::new()))
    }

    fn server_builder(server: &MockServer) -> RequestBuilder {
        let base = Url::parse(&server.uri()).unwrap();
        RequestBuilder::new(base, Arc::new(reqwest::Client::new()))
    }

    #[test]
    fn test_get_request() {
        let req = local_builder().new_request("/path");

        assert_eq!(req.url().host_str(), Some("localhost"));
        assert_eq!(req.url().port(), Some(1234));
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url().as_str(), "http://localhost:1234/base/path");
        assert_eq!(req.headers().len(), 0);
        assert!(req.body().is_none());
        assert!(req.error().is_none());
    }

    #[test]
    fn test_post_json_request() {
        let req = local_builder().new_request("/path").post_json("Hello");

        assert_eq!(req.url().host_str(), Some("localhost"));
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().as_str(), "http://localhost:1234/base/path");
        assert_eq!(req.headers().len(), 1);
        assert_eq!(
            req.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = std::str::from_utf8(req.body().unwrap()).unwrap();
        assert_eq!(body.trim(), r#""Hello""#);
    }

    #[test]
    fn test_repeated_json_body_keeps_single_content_type() {
        let req = local_builder()
            .new_request("/path")
            .post_json("first")
            .patch_json("second");

        assert_eq!(req.method(), Method::PATCH);
        assert_eq!(req.headers().get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(req.body(), Some(&br#""second""#[..]));
    }

    #[test]
    fn test_sensitive_header_hidden_from_debug() {
        let req = local_builder()
            .new_request("/path")
            .add_sensitive_header("X-Api-Key", "hidden-key")
            .add_header("X-Trace", "visible");

        let debug = format!("{req:?}");
        assert!(!debug.contains("hidden-key"), "got {debug}");
        assert!(debug.contains("visible"));
        assert_eq!(req.headers().get("x-api-key").unwrap(), "hidden-key");
    }

    #[test]
    fn test_query_and_header_chain() {
        let req = local_builder().new_request("/path/one/two");
        assert_eq!(
            req.url().as_str(),
            "http://localhost:1234/base/path/one/two"
        );

        let req = req.add_query("q1", "qv1");
        assert_eq!(
            req.url().as_str(),
            "http://localhost:1234/base/path/one/two?q1=qv1"
        );

        let req = req.add_header("h1", "hv1");
        assert_eq!(req.headers().get("h1").unwrap(), "hv1");
    }

    #[test]
    fn test_add_query_keeps_existing_values() {
        let req = local_builder()
            .new_request("/search")
            .add_query("symbol", "AAPL")
            .add_query("symbol", "MSFT");

        let values: Vec<_> = req
            .url()
            .query_pairs()
            .filter(|(key, _)| key == "symbol")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(values, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_raw_body_methods() {
        let req = local_builder().new_request("/raw").patch("abc");
        assert_eq!(req.method(), Method::PATCH);
        assert_eq!(req.body(), Some(&b"abc"[..]));
        assert!(req.headers().get(CONTENT_TYPE).is_none());

        let req = local_builder().new_request("/raw").delete();
        assert_eq!(req.method(), Method::DELETE);
        assert!(req.body().is_none());
    }

    #[tokio::test]
    async fn test_encode_error_short_circuits() {
        let transport = Arc::new(CountingTransport::default());
        let base = Url::parse("http://localhost:1234/base").unwrap();
        let builder = RequestBuilder::new(base, transport.clone());

        let req = builder.new_request("/path").post_json(&WontEncode);
        assert!(req.body().is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());

        let err = req.raw_response().await.unwrap_err();
        assert!(err.is_build_error());
        assert!(err.to_string().contains("ERROR 12345"), "got {err}");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_error_survives_later_chain_calls() {
        let transport = Arc::new(CountingTransport::default());
        let base = Url::parse("http://localhost:1234/base").unwrap();
        let builder = RequestBuilder::new(base, transport.clone());

        let req = builder
            .new_request("/path")
            .add_header("bad header", "value")
            .add_header("also bad", "value")
            .post_json(&WontEncode)
            .add_query("q", "v")
            .add_header("h1", "hv1");

        assert_eq!(req.url().query(), None);
        assert_eq!(req.headers().len(), 0);

        let err = req.decode_into::<KeyValue>().await.unwrap_err();
        match err {
            TptError::InvalidHeader { name, .. } => assert_eq!(name, "bad header"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_decode_into_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"key":"value"}"#, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let value: KeyValue = server_builder(&server)
            .new_request("/")
            .decode_into()
            .await
            .expect("decode_into failed");

        assert_eq!(value.key, "value");
    }

    #[tokio::test]
    async fn test_decode_into_non_200_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_raw(r#"{"key":"value"}"#, "application/json"))
            .mount(&server)
            .await;

        let err = server_builder(&server)
            .new_request("/missing")
            .decode_into::<KeyValue>()
            .await
            .unwrap_err();

        match err {
            TptError::Api { code, message } => {
                assert_eq!(code, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_decode_into_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
            .mount(&server)
            .await;

        let err = server_builder(&server)
            .new_request("/broken")
            .decode_into::<KeyValue>()
            .await
            .unwrap_err();

        assert!(matches!(err, TptError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_post_json_reaches_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(query_param("mode", "plain"))
            .and(header("content-type", "application/json"))
            .and(header("x-trace", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
            .expect(1)
            .mount(&server)
            .await;

        let text = server_builder(&server)
            .new_request("/echo")
            .add_query("mode", "plain")
            .add_header("X-Trace", "abc")
            .post_json(&serde_json::json!({"hello": "world"}))
            .as_string()
            .await
            .expect("as_string failed");

        assert_eq!(text, "accepted");
    }

    #[tokio::test]
    async fn test_as_string_returns_error_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teapot"))
            .respond_with(ResponseTemplate::new(418).set_body_string("short and stout"))
            .mount(&server)
            .await;

        let text = server_builder(&server)
            .new_request("/teapot")
            .as_string()
            .await
            .expect("as_string failed");

        assert_eq!(text, "short and stout");
    }
}
