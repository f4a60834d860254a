//! The processing session: a store of records tied to the data directory's snapshot.
//!
//! Opening a session auto-loads the snapshot at `$VENTAS_HOME/ventas.json` when one exists,
//! re-running it through the same ingestion path as a user import so validation applies
//! identically to resumed data. Commands that mutate the store save the snapshot back before
//! returning. The whole dataset lives in memory for the session lifetime.

use crate::config::Config;
use crate::ingest::{self, ImportOutcome};
use crate::model::SaleStore;
use crate::Result;
use anyhow::Context;
use std::path::Path;
use tracing::{debug, warn};

pub struct Session {
    config: Config,
    store: SaleStore,
}

impl Session {
    /// Opens a session, loading the prior snapshot through ingestion if one is present.
    ///
    /// # Errors
    /// Returns an error if the snapshot exists but cannot be read or parsed.
    pub fn open(config: Config) -> Result<Self> {
        let mut store = SaleStore::new();
        let snapshot = config.snapshot_path();
        if snapshot.is_file() {
            let content = std::fs::read_to_string(&snapshot).with_context(|| {
                format!("Unable to read the snapshot at '{}'", snapshot.display())
            })?;
            match ingest::import_json(&mut store, &content)? {
                ImportOutcome::NothingToImport => {
                    debug!("The snapshot at '{}' is empty", snapshot.display())
                }
                ImportOutcome::Imported(report) => {
                    for diagnostic in &report.diagnostics {
                        warn!("{diagnostic}");
                    }
                    debug!(
                        "Loaded {} records from '{}'",
                        report.added,
                        snapshot.display()
                    );
                }
            }
        }
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &SaleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SaleStore {
        &mut self.store
    }

    /// Writes the snapshot back to its well-known path.
    pub fn save(&self) -> Result<()> {
        self.export(self.config.snapshot_path()).map(|_| ())
    }

    /// Writes the current records to `path` as a JSON array with every field present,
    /// including imputed values. Returns the number of records written.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let records = self.store.records();
        let data = serde_json::to_string_pretty(records)
            .context("Unable to serialize the sales records")?;
        std::fs::write(path, data)
            .with_context(|| format!("Unable to write the records to '{}'", path.display()))?;
        Ok(records.len())
    }
}
