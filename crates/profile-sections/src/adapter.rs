//! Entity adapters: the per-kind glue between domain items and wire records.

use profile_http::{RequestBody, Result as ApiResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// The five list-shaped profile sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Achievement,
    Contact,
    Experience,
    GalleryImage,
    PublicLink,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Achievement,
        EntityKind::Contact,
        EntityKind::Experience,
        EntityKind::GalleryImage,
        EntityKind::PublicLink,
    ];

    /// Resource path segment under the API base URL.
    pub fn resource(self) -> &'static str {
        match self {
            EntityKind::Achievement => "achievements",
            EntityKind::Contact => "contacts",
            EntityKind::Experience => "experiences",
            EntityKind::GalleryImage => "gallery",
            EntityKind::PublicLink => "links",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

/// Where `add()` puts the new placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertPosition {
    Front,
    Back,
}

/// A completed remote mutation, as seen by host-refresh rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
}

/// Per-kind mapping and endpoint naming. Adapters hold no state and no
/// business rules; a record that cannot be mapped is a bug in the adapter.
pub trait EntityAdapter: Send + Sync + 'static {
    /// In-memory shape rendered by the section.
    type Item: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;
    /// Server-facing shape.
    type Wire: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;

    const KIND: EntityKind;
    const INSERT_AT: InsertPosition = InsertPosition::Front;

    /// Raw identity as stored on the item.
    fn raw_identity(item: &Self::Item) -> Option<i64>;

    /// An empty item with no identity.
    fn placeholder() -> Self::Item;

    fn to_wire(item: &Self::Item) -> Self::Wire;

    fn from_wire(record: Self::Wire) -> Self::Item;

    fn from_wire_list(records: Vec<Self::Wire>) -> Vec<Self::Item> {
        records.into_iter().map(Self::from_wire).collect()
    }

    /// Identity of a persisted item; `None` and the `0` sentinel both mean
    /// "not yet persisted".
    fn identity(item: &Self::Item) -> Option<i64> {
        Self::raw_identity(item).filter(|id| *id != 0)
    }

    /// Body for create/update calls.
    fn request_body(record: &Self::Wire) -> ApiResult<RequestBody> {
        RequestBody::json(record)
    }

    /// Whether the host page must refresh after `mutation`, given how many
    /// items the section holds afterwards.
    fn refreshes_host(_mutation: Mutation, _remaining: usize) -> bool {
        false
    }

    fn collection_path() -> String {
        Self::KIND.resource().to_string()
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::KIND.resource(), id)
    }
}
