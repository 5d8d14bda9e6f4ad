use crate::adapter::{EntityAdapter, EntityKind};
use serde::{Deserialize, Serialize};

/// Channel of a contact detail. Types the client does not know are kept
/// verbatim so an edit never rewrites them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ContactKind {
    #[default]
    Email,
    Phone,
    Agent,
    Other(String),
}

impl ContactKind {
    pub fn as_str(&self) -> &str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::Agent => "agent",
            ContactKind::Other(kind) => kind,
        }
    }
}

impl From<String> for ContactKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "email" => ContactKind::Email,
            "phone" => ContactKind::Phone,
            "agent" => ContactKind::Agent,
            _ => ContactKind::Other(kind),
        }
    }
}

impl From<ContactKind> for String {
    fn from(kind: ContactKind) -> Self {
        match kind {
            ContactKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDetail {
    pub id: Option<i64>,
    pub kind: ContactKind,
    pub value: String,
    pub label: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: ContactKind,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

pub struct ContactAdapter;

impl EntityAdapter for ContactAdapter {
    type Item = ContactDetail;
    type Wire = ContactRecord;

    const KIND: EntityKind = EntityKind::Contact;

    fn raw_identity(item: &ContactDetail) -> Option<i64> {
        item.id
    }

    fn placeholder() -> ContactDetail {
        ContactDetail::default()
    }

    fn to_wire(item: &ContactDetail) -> ContactRecord {
        ContactRecord {
            id: Self::identity(item),
            kind: item.kind.clone(),
            value: item.value.clone(),
            label: item.label.clone(),
        }
    }

    fn from_wire(record: ContactRecord) -> ContactDetail {
        ContactDetail {
            id: record.id,
            kind: record.kind,
            value: record.value,
            label: record.label,
        }
    }
}
