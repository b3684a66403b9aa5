//! Gate persistence
//!
//! The whole collection is written on every change and read once at startup.
//! Reading never fails: anything unreadable is logged and treated as an empty
//! collection.

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::gate::Gate;

/// Failure to write the collection
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write gate file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode gates: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage collaborator for the gate collection
pub trait GateStore {
    /// Load every stored gate in order, or nothing if the data is missing or unreadable
    fn load_gates(&self) -> Vec<Gate>;

    /// Replace the stored collection
    fn save_gates(&self, gates: &[Gate]) -> Result<(), StoreError>;
}

/// Decode a stored collection. `null` counts as empty.
pub(crate) fn decode_gates(contents: &str) -> Result<Vec<Gate>, serde_json::Error> {
    let gates: Option<Vec<Gate>> = serde_json::from_str(contents)?;
    Ok(gates.unwrap_or_default())
}
