use crate::adapter::{EntityAdapter, EntityKind};
use serde::{Deserialize, Serialize};

/// An award or placement, e.g. "1st" in "Dance" at "Spring Showcase 2022".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Achievement {
    pub id: Option<i64>,
    pub rank: String,
    pub field: String,
    pub show_name: String,
    pub year: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub show_name: String,
    #[serde(default)]
    pub year: Option<i32>,
}

pub struct AchievementAdapter;

impl EntityAdapter for AchievementAdapter {
    type Item = Achievement;
    type Wire = AchievementRecord;

    const KIND: EntityKind = EntityKind::Achievement;

    fn raw_identity(item: &Achievement) -> Option<i64> {
        item.id
    }

    fn placeholder() -> Achievement {
        Achievement::default()
    }

    fn to_wire(item: &Achievement) -> AchievementRecord {
        AchievementRecord {
            id: Self::identity(item),
            rank: item.rank.clone(),
            field: item.field.clone(),
            show_name: item.show_name.clone(),
            year: item.year,
        }
    }

    fn from_wire(record: AchievementRecord) -> Achievement {
        Achievement {
            id: record.id,
            rank: record.rank,
            field: record.field,
            show_name: record.show_name,
            year: record.year,
        }
    }
}
