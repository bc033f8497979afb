// Roadmap catalog: the read-only course → branch → year document,
// keyword search over its skills, and plain-text export of a single leaf.

pub mod export;
pub mod handlers;
pub mod models;
pub mod search;
pub mod store;

pub use models::Catalog;
pub use store::CatalogStore;
