use serde::{Deserialize, Serialize};

use crate::catalog::models::Catalog;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub course: String,
    pub branch: String,
    pub year: String,
    pub matched_skill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<SearchHit>,
    pub count: usize,
}

/// Case-insensitive substring search over the technical and core skills of
/// every leaf. Each qualifying skill is its own hit; nothing is de-duplicated.
pub fn search(catalog: &Catalog, query: &str) -> Result<SearchResults, AppError> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Err(AppError::Validation("No search query provided".to_string()));
    }

    let results: Vec<SearchHit> = catalog
        .leaves()
        .flat_map(|(course, branch, year, entry)| {
            entry
                .searchable_skills()
                .filter(|skill| skill.to_lowercase().contains(&needle))
                .map(move |skill| SearchHit {
                    course: course.to_string(),
                    branch: branch.to_string(),
                    year: year.to_string(),
                    matched_skill: skill.clone(),
                })
        })
        .collect();

    Ok(SearchResults {
        count: results.len(),
        results,
    })
}
