//! Explicit cache of loaded catalogs.
//!
//! Loading a large catalog (SBDB exports run to a million rows) is the dominant cost of a
//! session, and the same file is typically evaluated at several epochs. [`CatalogCache`]
//! keeps every table it loaded, keyed by source path and ingestion options, until it is
//! invalidated or dropped. Derived quantities (positions, distances) are never cached.
use std::{collections::HashMap, sync::Arc};

use ahash::RandomState;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use super::{csv_reader::load_catalog, schema::LoadOptions, ElementTable};
use crate::heliorbit_errors::HeliorbitError;

type CacheKey = (Utf8PathBuf, LoadOptions);

/// Loaded tables, keyed by `(path, options)`.
#[derive(Debug, Default)]
pub struct CatalogCache {
    tables: HashMap<CacheKey, Arc<ElementTable>, RandomState>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first access.
    ///
    /// A failed load leaves the cache unchanged, so the next call retries.
    pub fn get_or_load(
        &mut self,
        path: &Utf8Path,
        options: &LoadOptions,
    ) -> Result<Arc<ElementTable>, HeliorbitError> {
        let key = (path.to_path_buf(), options.clone());
        if let Some(table) = self.tables.get(&key) {
            debug!("{path}: served from cache");
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_catalog(path, options)?);
        self.tables.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Register an already parsed table under `path`.
    pub fn insert(&mut self, path: &Utf8Path, options: &LoadOptions, table: ElementTable) {
        self.tables
            .insert((path.to_path_buf(), options.clone()), Arc::new(table));
    }

    /// Drop every table loaded from `path`, whatever the options. Returns the number removed.
    pub fn invalidate(&mut self, path: &Utf8Path) -> usize {
        let before = self.tables.len();
        self.tables.retain(|(p, _), _| p != path);
        before - self.tables.len()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
