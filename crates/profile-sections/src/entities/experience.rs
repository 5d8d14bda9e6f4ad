use crate::adapter::{EntityAdapter, EntityKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Experience {
    pub id: Option<i64>,
    pub title: String,
    pub role: String,
    pub production: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub production: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub struct ExperienceAdapter;

impl EntityAdapter for ExperienceAdapter {
    type Item = Experience;
    type Wire = ExperienceRecord;

    const KIND: EntityKind = EntityKind::Experience;

    fn raw_identity(item: &Experience) -> Option<i64> {
        item.id
    }

    fn placeholder() -> Experience {
        Experience::default()
    }

    fn to_wire(item: &Experience) -> ExperienceRecord {
        ExperienceRecord {
            id: Self::identity(item),
            title: item.title.clone(),
            role: item.role.clone(),
            production: item.production.clone(),
            start_year: item.start_year,
            end_year: item.end_year,
            description: item.description.clone(),
        }
    }

    fn from_wire(record: ExperienceRecord) -> Experience {
        Experience {
            id: record.id,
            title: record.title,
            role: record.role,
            production: record.production,
            start_year: record.start_year,
            end_year: record.end_year,
            description: record.description,
        }
    }
}
