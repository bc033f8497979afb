use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::catalog::models::Catalog;

/// Reads the roadmap document from disk. No caching: every call re-reads the
/// file, so edits to the document are visible on the next request.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog. A missing file yields an empty catalog;
    /// a malformed one is an error.
    pub async fn load(&self) -> Result<Catalog> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Catalog file {} not found, serving empty catalog", self.path.display());
                return Ok(Catalog::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read catalog file {}", self.path.display())
                })
            }
        };

        let catalog: Catalog = serde_json::from_str(&raw)
            .with_context(|| format!("Catalog file {} is not a valid roadmap document", self.path.display()))?;

        debug!("Loaded catalog with {} courses", catalog.0.len());
        Ok(catalog)
    }
}
