//! Collection envelopes, page sizes and the cursor walker.
//!
//! Every collection resource answers with the same envelope:
//! ```json
//! { "self": "...", "<itemsKey>": [...], "statistics": {"pageSize": 5, "currentPage": 1},
//!   "prev": "...", "next": "..." }
//! ```
//! `next` and `prev` are opaque absolute URLs. The walker reissues them as
//! plain GETs against the configured base URL; a cursor that leads to an
//! empty page is reported exactly like a missing cursor.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use c8y_core::constants::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use c8y_core::error::{C8yError, C8yResult};

use crate::client::ApiClient;
use crate::request::CallDescription;

/// Number of items per page, validated to `1..=2000` before any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(u32);

impl PageSize {
    /// Page size the platform uses when none is sent.
    pub const DEFAULT: PageSize = PageSize(5);

    pub fn new(size: i64) -> C8yResult<Self> {
        if (i64::from(MIN_PAGE_SIZE)..=i64::from(MAX_PAGE_SIZE)).contains(&size) {
            // In range, so the cast cannot truncate.
            Ok(PageSize(size as u32))
        } else {
            Err(C8yError::client(
                "validate page size",
                format!("page size {size} is outside the allowed range {MIN_PAGE_SIZE}..={MAX_PAGE_SIZE}"),
            ))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for PageSize {
    type Error = C8yError;

    fn try_from(size: i64) -> C8yResult<Self> {
        PageSize::new(size)
    }
}

/// Paging statistics of one collection page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub current_page: u32,
    /// Only present when requested with `withTotalPages=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,
}

#[derive(Deserialize)]
struct StatisticsOnly {
    #[serde(default)]
    statistics: Statistics,
}

impl Statistics {
    /// Read just the `statistics` object of a collection envelope.
    pub fn decode(operation: &str, body: &[u8]) -> C8yResult<Self> {
        serde_json::from_slice::<StatisticsOnly>(body)
            .map(|s| s.statistics)
            .map_err(|e| C8yError::client(operation, format!("failed to decode statistics: {e}")))
    }
}

/// One page of a collection resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub self_url: String,
    pub items: Vec<T>,
    pub next: Option<String>,
    pub prev: Option<String>,
    pub statistics: Statistics,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "self", default)]
    self_url: String,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    prev: Option<String>,
    #[serde(default)]
    statistics: Statistics,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<T: DeserializeOwned> Collection<T> {
    /// Decode an envelope whose items live under `items_key`.
    ///
    /// A missing or null items field decodes as an empty page.
    pub fn decode(operation: &str, items_key: &str, body: &[u8]) -> C8yResult<Self> {
        let mut envelope: Envelope = serde_json::from_slice(body).map_err(|e| {
            C8yError::client(operation, format!("failed to decode collection: {e}"))
        })?;

        let items = match envelope.rest.remove(items_key) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                C8yError::client(operation, format!("failed to decode {items_key}: {e}"))
            })?,
        };

        Ok(Self {
            self_url: envelope.self_url,
            items,
            next: envelope.next,
            prev: envelope.prev,
            statistics: envelope.statistics,
        })
    }
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Resolves `next`/`prev` cursors of one collection resource.
#[derive(Debug, Clone)]
pub struct CursorWalker<'a> {
    client: &'a ApiClient,
    operation: String,
    items_key: String,
    accept: String,
}

impl<'a> CursorWalker<'a> {
    pub fn new(
        client: &'a ApiClient,
        operation: impl Into<String>,
        items_key: impl Into<String>,
        accept: impl Into<String>,
    ) -> Self {
        Self {
            client,
            operation: operation.into(),
            items_key: items_key.into(),
            accept: accept.into(),
        }
    }

    /// Fetch the page `cursor` points at.
    ///
    /// `Ok(None)` when there is no cursor (no request is made) or when the
    /// page it points at holds no items.
    pub fn resolve_page<T: DeserializeOwned>(
        &self,
        cursor: Option<&str>,
    ) -> C8yResult<Option<Collection<T>>> {
        let Some(cursor) = cursor.map(str::trim).filter(|c| !c.is_empty()) else {
            debug!("{}: no cursor, no page", self.operation);
            return Ok(None);
        };

        let call = self.cursor_call(cursor)?;
        let body = self
            .client
            .send(&call)?
            .into_body(&self.operation)?;
        let page: Collection<T> = Collection::decode(&self.operation, &self.items_key, &body)?;

        if page.is_empty() {
            debug!("{}: cursor led to an empty page", self.operation);
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// GET for the cursor's path and query, against the configured base URL.
    fn cursor_call(&self, cursor: &str) -> C8yResult<CallDescription> {
        let url = reqwest::Url::parse(cursor).map_err(|e| {
            C8yError::client(&self.operation, format!("malformed cursor URL '{cursor}': {e}"))
        })?;

        // Links include the base URL's path prefix when served through it.
        let prefix = self.client.base_url().path().trim_end_matches('/');
        let path = url
            .path()
            .strip_prefix(prefix)
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(url.path());
        let mut call = CallDescription::get(&self.operation, path).accept(&self.accept);
        if let Some(query) = url.query().filter(|q| !q.is_empty()) {
            call = call.raw_query(query);
        }
        Ok(call)
    }
}
