//! Generic resource façade.
//!
//! Every platform resource is the same shape: a base path, a payload type,
//! an items key inside collection envelopes and a pair of vendor media
//! types. [`ResourceKind`] captures those; [`Resource`] implements the
//! CRUD, paging and counting operations once for all of them.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use c8y_core::constants::query;
use c8y_core::error::{C8yError, C8yResult};
use c8y_models::QueryFilter;

use crate::client::ApiClient;
use crate::collection::{Collection, PageSize, Statistics};
use crate::request::{id_segment, CallDescription, QueryParams};
use crate::response::{self, Outcome};

/// Static description of one platform resource.
pub trait ResourceKind {
    /// Payload sent and received for a single resource.
    type Item: Serialize + DeserializeOwned;

    /// Singular name used in error labels, e.g. `managed object`.
    const NAME: &'static str;
    /// Plural name used in error labels, e.g. `managed objects`.
    const PLURAL: &'static str;
    /// Key of the item array inside a collection envelope.
    const ITEMS_KEY: &'static str;
    /// Media type name of a single item, e.g. `managedObject`.
    const MEDIA_TYPE: &'static str;
    /// Media type name of a collection page, e.g. `managedObjectCollection`.
    const COLLECTION_MEDIA_TYPE: &'static str;
}

/// Source of paging statistics for [`Resource::count`].
pub trait StatisticsSource: Send + Sync {
    /// Statistics for the collection at `path` restricted by `filter`.
    fn fetch(
        &self,
        client: &ApiClient,
        operation: &str,
        path: &str,
        accept: &str,
        filter: &QueryParams,
    ) -> C8yResult<Statistics>;
}

/// Asks the platform: one item per page with `withTotalPages=true`, so
/// `totalPages` equals the number of matching records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerStatistics;

impl StatisticsSource for ServerStatistics {
    fn fetch(
        &self,
        client: &ApiClient,
        operation: &str,
        path: &str,
        accept: &str,
        filter: &QueryParams,
    ) -> C8yResult<Statistics> {
        let mut params = QueryParams::new()
            .with(query::PAGE_SIZE, "1")
            .with(query::WITH_TOTAL_PAGES, "true");
        params.extend_from(filter);

        let call = CallDescription::get(operation, path).query(params).accept(accept);
        let body = client.send(&call)?.into_body(operation)?;
        Statistics::decode(operation, &body)
    }
}

/// Façade over one resource kind rooted at one base path.
pub struct Resource<K: ResourceKind> {
    client: ApiClient,
    base_path: String,
    statistics: Arc<dyn StatisticsSource>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_path: self.base_path.clone(),
            statistics: Arc::clone(&self.statistics),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &K::NAME)
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

impl<K: ResourceKind> Resource<K> {
    pub fn new(client: ApiClient, base_path: impl Into<String>) -> Self {
        Self {
            client,
            base_path: base_path.into(),
            statistics: Arc::new(ServerStatistics),
            _kind: PhantomData,
        }
    }

    /// Replace the statistics collaborator used by [`Resource::count`].
    pub fn with_statistics(mut self, statistics: Arc<dyn StatisticsSource>) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn item_media_type(&self) -> String {
        self.client.media_type(K::MEDIA_TYPE)
    }

    pub(crate) fn collection_media_type(&self) -> String {
        self.client.media_type(K::COLLECTION_MEDIA_TYPE)
    }

    /// `<base>/<id>`, rejecting an empty id before any request is made.
    pub(crate) fn item_path(&self, operation: &str, id: &str) -> C8yResult<String> {
        Ok(format!("{}/{}", self.base_path, id_segment(operation, id)?))
    }

    /// POST a new item; the platform answers 201 with the stored item.
    pub fn create(&self, item: &K::Item) -> C8yResult<K::Item> {
        let operation = format!("create {}", K::NAME);
        let media = self.item_media_type();
        let call = CallDescription::post(&operation, &self.base_path)
            .accept(&media)
            .content_type(&media)
            .json_body(item)?;
        self.client.fetch(&call)
    }

    /// GET one item. A 404 is an error.
    pub fn get(&self, id: &str) -> C8yResult<K::Item> {
        let operation = format!("get {}", K::NAME);
        let call = CallDescription::get(&operation, self.item_path(&operation, id)?)
            .accept(self.item_media_type());
        self.client.fetch(&call)
    }

    /// GET one item. A 404 yields `Ok(None)`.
    pub fn find_by_id(&self, id: &str) -> C8yResult<Option<K::Item>> {
        let operation = format!("find {}", K::NAME);
        let call = CallDescription::get(&operation, self.item_path(&operation, id)?)
            .accept(self.item_media_type())
            .absent_on_not_found();
        match self.client.send(&call)? {
            Outcome::Absent => Ok(None),
            outcome => {
                let body = outcome.into_body(&operation)?;
                response::decode(&operation, &body).map(Some)
            }
        }
    }

    /// PUT changes to an existing item; returns the updated item.
    pub fn update(&self, id: &str, item: &K::Item) -> C8yResult<K::Item> {
        self.update_with(id, item)
    }

    /// PUT an arbitrary partial payload, e.g. `{"status": "ACCEPTED"}`.
    pub fn update_with<P: Serialize + ?Sized>(&self, id: &str, payload: &P) -> C8yResult<K::Item> {
        let operation = format!("update {}", K::NAME);
        let media = self.item_media_type();
        let call = CallDescription::put(&operation, self.item_path(&operation, id)?)
            .accept(&media)
            .content_type(&media)
            .json_body(payload)?;
        self.client.fetch(&call)
    }

    /// DELETE an item. Sends neither Accept nor Content-Type.
    pub fn delete(&self, id: &str) -> C8yResult<()> {
        let operation = format!("delete {}", K::NAME);
        let call = CallDescription::delete(&operation, self.item_path(&operation, id)?);
        self.client.send(&call).map(|_| ())
    }

    /// First page of the collection, filtered.
    ///
    /// Unlike cursor pages, an empty first page is returned as an empty
    /// collection.
    pub fn list<F: QueryFilter + ?Sized>(
        &self,
        page_size: PageSize,
        filter: &F,
    ) -> C8yResult<Collection<K::Item>> {
        let operation = format!("list {}", K::PLURAL);
        let mut params = QueryParams::new().with(query::PAGE_SIZE, page_size.get().to_string());
        params.extend_from(filter);

        let call = CallDescription::get(&operation, &self.base_path)
            .query(params)
            .accept(self.collection_media_type());
        let body = self.client.send(&call)?.into_body(&operation)?;
        Collection::decode(&operation, K::ITEMS_KEY, &body)
    }

    /// The page after `page`, or `None` if there is none or it is empty.
    pub fn next_page(&self, page: &Collection<K::Item>) -> C8yResult<Option<Collection<K::Item>>> {
        self.resolve(&format!("next page of {}", K::PLURAL), page.next.as_deref())
    }

    /// The page before `page`, or `None` if there is none or it is empty.
    pub fn previous_page(
        &self,
        page: &Collection<K::Item>,
    ) -> C8yResult<Option<Collection<K::Item>>> {
        self.resolve(&format!("previous page of {}", K::PLURAL), page.prev.as_deref())
    }

    fn resolve(&self, operation: &str, cursor: Option<&str>) -> C8yResult<Option<Collection<K::Item>>> {
        self.client
            .walker(operation, K::ITEMS_KEY, &self.collection_media_type())
            .resolve_page(cursor)
    }

    /// Every item matching `filter`, following `next` cursors to the end.
    pub fn list_all<F: QueryFilter + ?Sized>(
        &self,
        page_size: PageSize,
        filter: &F,
    ) -> C8yResult<Vec<K::Item>> {
        let mut page = self.list(page_size, filter)?;
        let mut items = Vec::new();
        loop {
            let next = self.next_page(&page)?;
            items.append(&mut page.items);
            match next {
                Some(p) => page = p,
                None => return Ok(items),
            }
        }
    }

    /// Number of records matching `filter`, via the statistics collaborator.
    pub fn count<F: QueryFilter + ?Sized>(&self, filter: &F) -> C8yResult<u64> {
        let operation = format!("count {}", K::PLURAL);
        let mut params = QueryParams::new();
        params.extend_from(filter);

        let statistics = self.statistics.fetch(
            &self.client,
            &operation,
            &self.base_path,
            &self.collection_media_type(),
            &params,
        )?;
        statistics
            .total_pages
            .ok_or_else(|| C8yError::client(&operation, "platform did not report totalPages"))
    }
}
