use crate::adapter::{EntityAdapter, EntityKind, InsertPosition};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicLink {
    pub id: Option<i64>,
    pub title: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

pub struct PublicLinkAdapter;

impl EntityAdapter for PublicLinkAdapter {
    type Item = PublicLink;
    type Wire = LinkRecord;

    const KIND: EntityKind = EntityKind::PublicLink;
    const INSERT_AT: InsertPosition = InsertPosition::Back;

    fn raw_identity(item: &PublicLink) -> Option<i64> {
        item.id
    }

    fn placeholder() -> PublicLink {
        PublicLink::default()
    }

    fn to_wire(item: &PublicLink) -> LinkRecord {
        LinkRecord {
            id: Self::identity(item),
            title: item.title.clone(),
            url: item.url.clone(),
        }
    }

    fn from_wire(record: LinkRecord) -> PublicLink {
        PublicLink {
            id: record.id,
            title: record.title,
            url: record.url,
        }
    }
}
