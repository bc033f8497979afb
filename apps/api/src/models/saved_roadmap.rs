use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full `saved_roadmaps` row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedRoadmapRow {
    pub id: i64,
    pub email: String,
    pub course: String,
    pub branch: String,
    pub year: String,
}

/// A bookmark as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoadmap {
    pub course: String,
    pub branch: String,
    pub year: String,
}

impl From<SavedRoadmapRow> for SavedRoadmap {
    fn from(row: SavedRoadmapRow) -> Self {
        SavedRoadmap {
            course: row.course,
            branch: row.branch,
            year: row.year,
        }
    }
}
