//! Call descriptions and the request builder.
//!
//! A [`CallDescription`] says what one operation wants: method, path, query,
//! optional Accept/Content-Type, optional body, and its response contract
//! (expected status, whether an empty body is fine, whether 404 means
//! "absent"). The [`RequestBuilder`] turns it into a [`PreparedRequest`]
//! against the configured base URL, always attaching basic auth.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;
use url::form_urlencoded;

use c8y_core::config::Credentials;
use c8y_core::error::{C8yError, C8yResult};
use c8y_models::QueryFilter;

/// Ordered query parameters. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Append every pair contributed by `filter`.
    pub fn extend_from<F: QueryFilter + ?Sized>(&mut self, filter: &F) {
        self.0.extend(filter.query_pairs());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `application/x-www-form-urlencoded` string in insertion order.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    /// Inverse of [`QueryParams::encode`].
    pub fn decode(query: &str) -> Self {
        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }
}

impl QueryFilter for QueryParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.0.clone()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Percent-encode a single path segment, e.g. an id.
pub fn path_segment(raw: &str) -> String {
    // byte_serialize uses '+' for spaces; a literal '+' comes out as %2B.
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Encoded path segment for `id`, rejecting a blank id before any request.
pub fn id_segment(operation: &str, id: &str) -> C8yResult<String> {
    if id.trim().is_empty() {
        return Err(C8yError::client(
            operation,
            format!("{operation} without an id is not allowed"),
        ));
    }
    Ok(path_segment(id))
}

/// Everything one operation needs to go over the wire, plus its response
/// contract.
#[derive(Debug, Clone)]
pub struct CallDescription {
    /// Label used in every error this call produces.
    pub operation: String,
    pub method: Method,
    /// Already-encoded path, appended to the base URL's path.
    pub path: String,
    pub query: QueryParams,
    /// Pre-encoded query sent byte for byte; takes precedence over `query`.
    pub raw_query: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Vec<u8>>,
    /// Status that counts as success.
    pub expected_status: u16,
    /// Whether an empty body on the success status is acceptable.
    pub allows_empty_body: bool,
    /// Whether 404 is reported as "absent" instead of an error.
    pub absent_on_not_found: bool,
}

impl CallDescription {
    fn new(operation: impl Into<String>, method: Method, path: impl Into<String>, expected: u16) -> Self {
        Self {
            operation: operation.into(),
            method,
            path: path.into(),
            query: QueryParams::new(),
            raw_query: None,
            accept: None,
            content_type: None,
            body: None,
            expected_status: expected,
            allows_empty_body: false,
            absent_on_not_found: false,
        }
    }

    /// GET expecting 200.
    pub fn get(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path, 200)
    }

    /// POST expecting 201.
    pub fn post(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, path, 201)
    }

    /// PUT expecting 200.
    pub fn put(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PUT, path, 200)
    }

    /// DELETE expecting 204 with no content.
    pub fn delete(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::DELETE, path, 204).allow_empty_body()
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn raw_query(mut self, query: impl Into<String>) -> Self {
        self.raw_query = Some(query.into());
        self
    }

    pub fn accept(mut self, media_type: impl Into<String>) -> Self {
        self.accept = Some(media_type.into());
        self
    }

    pub fn content_type(mut self, media_type: impl Into<String>) -> Self {
        self.content_type = Some(media_type.into());
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn allow_empty_body(mut self) -> Self {
        self.allows_empty_body = true;
        self
    }

    pub fn absent_on_not_found(mut self) -> Self {
        self.absent_on_not_found = true;
        self
    }

    /// Serialize `payload` as the JSON body. Only POST and PUT carry a body.
    pub fn json_body<T: Serialize + ?Sized>(mut self, payload: &T) -> C8yResult<Self> {
        if self.method != Method::POST && self.method != Method::PUT {
            return Err(C8yError::client(
                self.operation,
                format!("a request body is not allowed on {}", self.method),
            ));
        }
        let body = serde_json::to_vec(payload).map_err(|e| {
            C8yError::client(&self.operation, format!("failed to encode request body: {e}"))
        })?;
        self.body = Some(body);
        Ok(self)
    }
}

/// A fully specified HTTP request, ready for a [`crate::transport::Transport`].
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds [`PreparedRequest`]s against one base URL with one set of credentials.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    base_url: &'a Url,
    credentials: &'a AuthHeader,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(base_url: &'a Url, credentials: &'a AuthHeader) -> Self {
        Self {
            base_url,
            credentials,
        }
    }

    /// Assemble the request. Performs no I/O.
    pub fn build(&self, call: &CallDescription) -> PreparedRequest {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{}", call.path));
        url.set_query(None);
        if let Some(raw) = &call.raw_query {
            url.set_query(Some(raw));
        } else if !call.query.is_empty() {
            url.query_pairs_mut().extend_pairs(call.query.pairs().iter());
        }

        let mut headers = vec![(AUTHORIZATION.to_string(), self.credentials.value().to_string())];
        if let Some(accept) = &call.accept {
            headers.push((ACCEPT.to_string(), accept.clone()));
        }
        if let Some(content_type) = &call.content_type {
            headers.push((CONTENT_TYPE.to_string(), content_type.clone()));
        }

        PreparedRequest {
            method: call.method.clone(),
            url,
            headers,
            body: call.body.clone(),
        }
    }
}

/// Precomputed `Authorization` value: `Basic base64(user:password)`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    pub fn new(credentials: &Credentials) -> Self {
        let raw = format!("{}:{}", credentials.auth_user(), credentials.password);
        Self(format!("Basic {}", STANDARD.encode(raw)))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthHeader(Basic ***)")
    }
}
