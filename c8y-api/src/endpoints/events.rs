//! Event endpoints.

use c8y_models::Event;

use crate::resource::ResourceKind;

/// `/event/events`
#[derive(Debug, Clone, Copy)]
pub struct Events;

impl ResourceKind for Events {
    type Item = Event;

    const NAME: &'static str = "event";
    const PLURAL: &'static str = "events";
    const ITEMS_KEY: &'static str = "events";
    const MEDIA_TYPE: &'static str = "event";
    const COLLECTION_MEDIA_TYPE: &'static str = "eventCollection";
}
