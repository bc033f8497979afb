use sqlx::SqlitePool;
use tracing::info;

use crate::models::saved_roadmap::SavedRoadmapRow;

/// Result of a save: a new bookmark, or one that already existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Duplicate,
}

/// Fields identifying the bookmarked leaf.
pub struct NewBookmark<'a> {
    pub email: &'a str,
    pub course: &'a str,
    pub branch: &'a str,
    pub year: &'a str,
}

/// Inserts the bookmark unless the same `(email, course, branch, year)` is
/// already stored. A single conditional INSERT backed by the unique index,
/// so concurrent saves of the same tuple cannot both create a row.
pub async fn save_bookmark(
    pool: &SqlitePool,
    bookmark: NewBookmark<'_>,
) -> Result<SaveOutcome, sqlx::Error> {
    let NewBookmark {
        email,
        course,
        branch,
        year,
    } = bookmark;

    let result = sqlx::query(
        r#"
        INSERT INTO saved_roadmaps (email, course, branch, year)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (email, course, branch, year) DO NOTHING
        "#,
    )
    .bind(email)
    .bind(course)
    .bind(branch)
    .bind(year)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(SaveOutcome::Duplicate);
    }

    info!("Saved roadmap {course}/{branch}/{year} for {email}");
    Ok(SaveOutcome::Created)
}

/// Returns every bookmark owned by `email`, oldest first.
pub async fn list_bookmarks(
    pool: &SqlitePool,
    email: &str,
) -> Result<Vec<SavedRoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, SavedRoadmapRow>(
        r#"
        SELECT id, email, course, branch, year
        FROM saved_roadmaps
        WHERE email = ?
        ORDER BY id ASC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await
}
