// Saved roadmaps: per-email bookmarks of catalog leaves, stored in SQLite.
// There is intentionally no delete operation.

pub mod handlers;
pub mod repository;
