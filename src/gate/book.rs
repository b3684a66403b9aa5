//! The gate collection service
//!
//! Owns the in-memory collection and its store. Each change is validated,
//! written as a whole collection, and only then applied in memory.

use thiserror::Error;

use super::{Gate, GateDraft, IdGenerator, RandomIds, ValidationError, DEFAULT_COLOR};
use crate::store::{GateStore, StoreError};

/// Errors from changing the collection
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no gate with id {0:?}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no unused gate id after {0} attempts")]
    IdsExhausted(usize),
}

/// Fresh ids drawn before giving up on a create
const MAX_ID_ATTEMPTS: usize = 16;

/// Gate collection backed by a store
pub struct GateBook {
    gates: Vec<Gate>,
    store: Box<dyn GateStore>,
    ids: Box<dyn IdGenerator>,
    default_color: String,
}

impl GateBook {
    /// Load the collection from a store
    pub fn open(store: impl GateStore + 'static) -> Self {
        let gates = store.load_gates();
        Self {
            gates,
            store: Box::new(store),
            ids: Box::new(RandomIds),
            default_color: DEFAULT_COLOR.to_string(),
        }
    }

    /// Use a different identifier source
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Color used for drafts that leave it empty
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// All gates in display order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True when there are no gates
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Look up a gate by id
    pub fn get(&self, id: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    /// Look up a gate by id, or failing that by case-insensitive name
    pub fn find(&self, query: &str) -> Option<&Gate> {
        self.get(query).or_else(|| {
            let query = query.trim().to_lowercase();
            self.gates.iter().find(|g| g.name.to_lowercase() == query)
        })
    }

    /// Validate a draft and append it as a new gate
    pub fn create(&mut self, draft: &GateDraft) -> Result<&Gate, GateError> {
        let id = self.fresh_id()?;
        let gate = draft.validate(id, &self.default_color)?;

        let mut next = self.gates.clone();
        next.push(gate);
        self.commit(next)?;

        tracing::info!("created gate {:?}", self.gates[self.gates.len() - 1].name);
        Ok(&self.gates[self.gates.len() - 1])
    }

    /// Replace every field of an existing gate except its id
    pub fn update(&mut self, id: &str, draft: &GateDraft) -> Result<&Gate, GateError> {
        let index = self.position(id)?;
        let gate = draft.validate(id, &self.default_color)?;

        let mut next = self.gates.clone();
        next[index] = gate;
        self.commit(next)?;

        tracing::info!("updated gate {:?}", self.gates[index].name);
        Ok(&self.gates[index])
    }

    /// Remove a gate, leaving the rest in order
    pub fn delete(&mut self, id: &str) -> Result<Gate, GateError> {
        let index = self.position(id)?;

        let mut next = self.gates.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        tracing::info!("deleted gate {:?}", removed.name);
        Ok(removed)
    }

    fn fresh_id(&mut self) -> Result<String, GateError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return Ok(id);
            }
        }
        Err(GateError::IdsExhausted(MAX_ID_ATTEMPTS))
    }

    fn position(&self, id: &str) -> Result<usize, GateError> {
        self.gates
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| GateError::NotFound(id.to_string()))
    }

    fn commit(&mut self, next: Vec<Gate>) -> Result<(), GateError> {
        self.store.save_gates(&next)?;
        self.gates = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::rc::Rc;

    /// Hands out g1, g2, ...
    struct Sequential(u32);

    impl IdGenerator for Sequential {
        fn next_id(&mut self) -> String {
            self.0 += 1;
            format!("g{}", self.0)
        }
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl GateStore for ReadOnlyStore {
        fn load_gates(&self) -> Vec<Gate> {
            Vec::new()
        }

        fn save_gates(&self, _gates: &[Gate]) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only")))
        }
    }

    /// Shares a memory store so tests can inspect what was written
    struct Shared(Rc<MemoryStore>);

    impl GateStore for Shared {
        fn load_gates(&self) -> Vec<Gate> {
            self.0.load_gates()
        }

        fn save_gates(&self, gates: &[Gate]) -> Result<(), StoreError> {
            self.0.save_gates(gates)
        }
    }

    fn draft(name: &str) -> GateDraft {
        GateDraft {
            name: name.to_string(),
            phone: "0601020304".to_string(),
            code: "1234".to_string(),
            delay: 3,
            color: String::new(),
        }
    }

    fn book() -> GateBook {
        GateBook::open(MemoryStore::new()).with_ids(Sequential(0))
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let mut book = book();
        let first = book.create(&draft("Lobby")).unwrap().id.clone();
        let second = book.create(&draft("Garage")).unwrap().id.clone();

        assert_eq!(first, "g1");
        assert_eq!(second, "g2");
        assert_eq!(book.len(), 2);
        assert_eq!(book.gates()[1].color, DEFAULT_COLOR);
    }

    #[test]
    fn test_create_skips_taken_ids() {
        let store = MemoryStore::new();
        store
            .save_gates(&[draft("Old").validate("g1", DEFAULT_COLOR).unwrap()])
            .unwrap();

        let mut book = GateBook::open(store).with_ids(Sequential(0));
        let id = book.create(&draft("New")).unwrap().id.clone();
        assert_eq!(id, "g2");
    }

    #[test]
    fn test_stuck_id_source_gives_up() {
        /// Always hands out the same id
        struct Fixed;

        impl IdGenerator for Fixed {
            fn next_id(&mut self) -> String {
                "same".to_string()
            }
        }

        let mut book = GateBook::open(MemoryStore::new()).with_ids(Fixed);
        book.create(&draft("First")).unwrap();

        let err = book.create(&draft("Second")).unwrap_err();
        assert!(matches!(err, GateError::IdsExhausted(MAX_ID_ATTEMPTS)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_invalid_draft_is_rejected_without_saving() {
        let shared = Rc::new(MemoryStore::new());
        let mut book = GateBook::open(Shared(shared.clone())).with_ids(Sequential(0));

        let err = book.create(&draft("  ")).unwrap_err();
        assert!(matches!(err, GateError::Validation(ValidationError::MissingField("name"))));
        assert!(book.is_empty());
        assert_eq!(shared.save_count(), 0);
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let mut book = book();
        book.create(&draft("Lobby")).unwrap();
        book.create(&draft("Garage")).unwrap();
        book.create(&draft("Back")).unwrap();

        let mut edit = GateDraft::from(book.get("g2").unwrap());
        edit.name = "Garage door".to_string();
        edit.delay = 5;
        book.update("g2", &edit).unwrap();

        let names: Vec<&str> = book.gates().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Lobby", "Garage door", "Back"]);
        assert_eq!(book.get("g2").unwrap().delay, 5);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut book = book();
        assert!(matches!(book.update("nope", &draft("X")), Err(GateError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut book = book();
        for name in ["A", "B", "C", "D"] {
            book.create(&draft(name)).unwrap();
        }

        let removed = book.delete("g2").unwrap();
        assert_eq!(removed.name, "B");

        let ids: Vec<&str> = book.gates().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g3", "g4"]);
        assert!(matches!(book.delete("g2"), Err(GateError::NotFound(_))));
    }

    #[test]
    fn test_every_change_is_persisted() {
        let shared = Rc::new(MemoryStore::new());
        let mut book = GateBook::open(Shared(shared.clone())).with_ids(Sequential(0));

        book.create(&draft("A")).unwrap();
        book.create(&draft("B")).unwrap();
        book.update("g1", &draft("A2")).unwrap();
        book.delete("g2").unwrap();

        assert_eq!(shared.save_count(), 4);
        let reopened = GateBook::open(Shared(shared));
        assert_eq!(reopened.gates(), book.gates());
    }

    #[test]
    fn test_failed_save_leaves_collection_unchanged() {
        let mut book = GateBook::open(ReadOnlyStore);

        assert!(matches!(book.create(&draft("A")), Err(GateError::Store(_))));
        assert!(book.is_empty());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let mut book = book();
        book.create(&draft("Front Door")).unwrap();

        assert_eq!(book.find("g1").unwrap().name, "Front Door");
        assert_eq!(book.find("front door").unwrap().id, "g1");
        assert!(book.find("back door").is_none());
    }

    #[test]
    fn test_custom_default_color() {
        let mut book = book().with_default_color("#2ECC71");
        assert_eq!(book.create(&draft("A")).unwrap().color, "#2ECC71");
    }
}
