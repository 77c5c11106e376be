//! Remote product source abstraction.
//!
//! The catalog platform is opaque: it can list products, pull a fresh copy
//! from upstream (sync), wipe everything, and report whether a sync is due.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use shelfview_catalog::RawProduct;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("product source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read products: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode products: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("operation not supported by this source: {0}")]
    Unsupported(&'static str),
}

/// Remote catalog operations consumed by the browser.
pub trait ProductSource: Send + Sync {
    /// Fetch every stored product record.
    fn fetch_all(&self) -> Result<Vec<RawProduct>, SourceError>;

    /// Pull products from upstream; returns a human-readable summary.
    fn sync(&self) -> Result<String, SourceError>;

    /// Delete all stored products.
    fn delete_all(&self) -> Result<(), SourceError>;

    /// Whether the store is empty and should be synced.
    fn needs_sync(&self) -> Result<bool, SourceError>;
}

impl<S> ProductSource for Arc<S>
where
    S: ProductSource + ?Sized,
{
    fn fetch_all(&self) -> Result<Vec<RawProduct>, SourceError> {
        (**self).fetch_all()
    }

    fn sync(&self) -> Result<String, SourceError> {
        (**self).sync()
    }

    fn delete_all(&self) -> Result<(), SourceError> {
        (**self).delete_all()
    }

    fn needs_sync(&self) -> Result<bool, SourceError> {
        (**self).needs_sync()
    }
}

/// In-memory source for tests/dev.
///
/// `upstream` is what a sync copies into the store.
#[derive(Debug, Default)]
pub struct InMemoryProductSource {
    stored: RwLock<Vec<RawProduct>>,
    upstream: Vec<RawProduct>,
}

impl InMemoryProductSource {
    pub fn new(upstream: Vec<RawProduct>) -> Self {
        Self {
            stored: RwLock::new(Vec::new()),
            upstream,
        }
    }

    /// Start with `stored` already present (no sync needed).
    pub fn with_stored(stored: Vec<RawProduct>) -> Self {
        Self {
            upstream: stored.clone(),
            stored: RwLock::new(stored),
        }
    }

    pub fn stored_len(&self) -> usize {
        self.stored.read().map(|s| s.len()).unwrap_or(0)
    }
}

fn poisoned() -> SourceError {
    SourceError::Unavailable("product store lock poisoned".to_string())
}

impl ProductSource for InMemoryProductSource {
    fn fetch_all(&self) -> Result<Vec<RawProduct>, SourceError> {
        let stored = self.stored.read().map_err(|_| poisoned())?;
        Ok(stored.clone())
    }

    fn sync(&self) -> Result<String, SourceError> {
        let mut stored = self.stored.write().map_err(|_| poisoned())?;
        *stored = self.upstream.clone();
        Ok(format!("Successfully synced {} products", stored.len()))
    }

    fn delete_all(&self) -> Result<(), SourceError> {
        let mut stored = self.stored.write().map_err(|_| poisoned())?;
        stored.clear();
        Ok(())
    }

    fn needs_sync(&self) -> Result<bool, SourceError> {
        let stored = self.stored.read().map_err(|_| poisoned())?;
        Ok(stored.is_empty())
    }
}

/// Read-only source backed by a JSON array of product records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductSource for JsonFileSource {
    fn fetch_all(&self) -> Result<Vec<RawProduct>, SourceError> {
        let bytes = std::fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn sync(&self) -> Result<String, SourceError> {
        Err(SourceError::Unsupported("sync"))
    }

    fn delete_all(&self) -> Result<(), SourceError> {
        Err(SourceError::Unsupported("delete_all"))
    }

    fn needs_sync(&self) -> Result<bool, SourceError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str) -> RawProduct {
        RawProduct {
            id: Some(id.to_string()),
            ..RawProduct::default()
        }
    }

    #[test]
    fn in_memory_sync_then_delete() {
        let source = InMemoryProductSource::new(vec![raw("a"), raw("b")]);
        assert!(source.needs_sync().unwrap());
        assert!(source.fetch_all().unwrap().is_empty());

        let message = source.sync().unwrap();
        assert_eq!(message, "Successfully synced 2 products");
        assert_eq!(source.fetch_all().unwrap().len(), 2);
        assert!(!source.needs_sync().unwrap());

        source.delete_all().unwrap();
        assert_eq!(source.stored_len(), 0);
        assert!(source.needs_sync().unwrap());
    }

    #[test]
    fn arc_source_delegates() {
        let source = Arc::new(InMemoryProductSource::with_stored(vec![raw("a")]));
        let shared: Arc<dyn ProductSource> = source.clone();
        assert_eq!(shared.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn json_file_source_reads_array() {
        let path = std::env::temp_dir().join(format!(
            "shelfview-source-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"[{"Id":"a","Name":"Lamp","UnitPrice":12.5}]"#).unwrap();

        let source = JsonFileSource::new(&path);
        let products = source.fetch_all().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].unit_price, Some(12.5));
        assert!(matches!(source.sync(), Err(SourceError::Unsupported("sync"))));
        assert!(!source.needs_sync().unwrap());
    }

    #[test]
    fn json_file_source_reports_missing_file() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        assert!(matches!(source.fetch_all(), Err(SourceError::Io(_))));
    }
}
