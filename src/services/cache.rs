//! Cache of the joined table
//!
//! Loading and joining only depends on the three source files, while
//! filtering and aggregating run on every interaction. `DatasetCache` keeps
//! the joined table and reloads it when a source file's modification time or
//! size changes.

use std::time::SystemTime;

use crate::config::{Settings, SourcePaths};
use crate::error::{DashboardError, DashboardResult};
use crate::models::EnrichedSale;

use super::loader::SalesLoader;

/// Modification time and length of one source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

/// Stamps of all three sources, in load order
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint(Vec<FileStamp>);

impl Fingerprint {
    fn of(sources: &SourcePaths) -> DashboardResult<Self> {
        let mut stamps = Vec::with_capacity(3);
        for (table, path) in sources.iter() {
            let metadata = std::fs::metadata(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DashboardError::SourceNotFound {
                        table,
                        path: path.to_path_buf(),
                    }
                } else {
                    DashboardError::Io(format!("Failed to stat {}: {}", path.display(), e))
                }
            })?;
            stamps.push(FileStamp {
                modified: metadata.modified().ok(),
                len: metadata.len(),
            });
        }
        Ok(Self(stamps))
    }
}

struct CachedDataset {
    fingerprint: Fingerprint,
    sales: Vec<EnrichedSale>,
}

/// Holds the joined table between pipeline runs
pub struct DatasetCache {
    sources: SourcePaths,
    settings: Settings,
    entry: Option<CachedDataset>,
    loads: usize,
}

impl DatasetCache {
    /// Create an empty cache for a set of sources
    pub fn new(sources: SourcePaths, settings: Settings) -> Self {
        Self {
            sources,
            settings,
            entry: None,
            loads: 0,
        }
    }

    /// Get the joined table, reloading if any source changed
    pub fn get(&mut self) -> DashboardResult<&[EnrichedSale]> {
        let fingerprint = Fingerprint::of(&self.sources)?;

        let entry = match self.entry.take() {
            Some(entry) if entry.fingerprint == fingerprint => {
                tracing::debug!(rows = entry.sales.len(), "dataset cache hit");
                entry
            }
            _ => {
                let sales = SalesLoader::new(&self.settings).load(&self.sources)?;
                self.loads += 1;
                CachedDataset { fingerprint, sales }
            }
        };

        Ok(&self.entry.insert(entry).sales)
    }

    /// Drop the cached table so the next `get` reloads
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of times the sources have been read
    pub fn load_count(&self) -> usize {
        self.loads
    }

    pub fn sources(&self) -> &SourcePaths {
        &self.sources
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardPaths;
    use tempfile::TempDir;

    const SALES: &str = "id venda,Dia,id da peça,valor da venda,Pago,Nome do cliente\n1,01/12,A,\"100,00\",Sim,Ana\n";
    const PRODUCTS: &str = "id da peça,id do fornecedor,descrição da peça,valor da peça,valor vender\nA,F1,Brinco,\"40,00\",\n";
    const SUPPLIERS: &str = "id do fornecedor,nome do fornecedor\nF1,Bijoux SP\n";

    fn setup() -> (TempDir, DatasetCache) {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::default();
        let sources = DashboardPaths::with_data_dir(temp_dir.path().to_path_buf()).sources(&settings);
        std::fs::write(&sources.sales, SALES).unwrap();
        std::fs::write(&sources.products, PRODUCTS).unwrap();
        std::fs::write(&sources.suppliers, SUPPLIERS).unwrap();
        (temp_dir, DatasetCache::new(sources, settings))
    }

    #[test]
    fn test_unchanged_sources_load_once() {
        let (_temp_dir, mut cache) = setup();

        assert_eq!(cache.get().unwrap().len(), 1);
        assert_eq!(cache.get().unwrap().len(), 1);
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn test_changed_source_reloads() {
        let (_temp_dir, mut cache) = setup();
        assert_eq!(cache.get().unwrap().len(), 1);

        let more_sales = format!("{}2,02/12,A,\"80,00\",Não,Bia\n", SALES);
        std::fs::write(&cache.sources().sales, more_sales).unwrap();

        assert_eq!(cache.get().unwrap().len(), 2);
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let (_temp_dir, mut cache) = setup();
        cache.get().unwrap();
        cache.invalidate();
        cache.get().unwrap();
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn test_missing_source_is_reported() {
        let (_temp_dir, mut cache) = setup();
        std::fs::remove_file(&cache.sources().suppliers).unwrap();

        let err = cache.get().unwrap_err();
        assert!(err.is_source_not_found());
    }
}
