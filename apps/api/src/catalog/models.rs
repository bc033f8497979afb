use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type YearMap = IndexMap<String, RoadmapEntry>;
pub type BranchMap = IndexMap<String, YearMap>;

/// One roadmap leaf: the skills and advice for a single course/branch/year.
/// Each list keeps whether it was authored at all, so an empty list in the
/// document is written back as an empty list and an absent one stays absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internships: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<Vec<String>>,
    /// Any other authored fields, passed through untouched.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Absent lists read as empty.
fn items(list: &Option<Vec<String>>) -> &[String] {
    list.as_deref().unwrap_or_default()
}

impl RoadmapEntry {
    pub fn technical(&self) -> &[String] {
        items(&self.technical)
    }

    pub fn core(&self) -> &[String] {
        items(&self.core)
    }

    pub fn projects(&self) -> &[String] {
        items(&self.projects)
    }

    pub fn certifications(&self) -> &[String] {
        items(&self.certifications)
    }

    pub fn internships(&self) -> &[String] {
        items(&self.internships)
    }

    pub fn career(&self) -> &[String] {
        items(&self.career)
    }

    pub fn advice(&self) -> &[String] {
        items(&self.advice)
    }

    /// Skills considered by search: technical first, then core.
    pub fn searchable_skills(&self) -> impl Iterator<Item = &String> {
        self.technical().iter().chain(self.core())
    }
}

/// The full course → branch → year document, in authored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(pub IndexMap<String, BranchMap>);

impl Catalog {
    pub fn leaf(&self, course: &str, branch: &str, year: &str) -> Option<&RoadmapEntry> {
        self.0.get(course)?.get(branch)?.get(year)
    }

    /// Every leaf as `(course, branch, year, entry)`, in document order.
    pub fn leaves(&self) -> impl Iterator<Item = (&str, &str, &str, &RoadmapEntry)> {
        self.0.iter().flat_map(|(course, branches)| {
            branches.iter().flat_map(move |(branch, years)| {
                years
                    .iter()
                    .map(move |(year, entry)| (course.as_str(), branch.as_str(), year.as_str(), entry))
            })
        })
    }
}
