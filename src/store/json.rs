//! Gate collection stored as a JSON array on disk

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{decode_gates, GateStore, StoreError};
use crate::gate::Gate;

/// Stores gates in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GateStore for JsonFileStore {
    fn load_gates(&self) -> Vec<Gate> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no gate file at {:?}, starting empty", self.path);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("failed to read gate file {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match decode_gates(&contents) {
            Ok(gates) => {
                tracing::debug!("loaded {} gates from {:?}", gates.len(), self.path);
                gates
            }
            Err(e) => {
                tracing::warn!("gate file {:?} is malformed, starting empty: {}", self.path, e);
                Vec::new()
            }
        }
    }

    fn save_gates(&self, gates: &[Gate]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(gates)?;

        // Write beside the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!("saved {} gates to {:?}", gates.len(), self.path);
        Ok(())
    }
}
