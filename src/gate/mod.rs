//! Gate records and the collection that owns them

mod book;
mod id;
mod model;

pub use book::{GateBook, GateError};
pub use id::{IdGenerator, RandomIds};
pub use model::{Gate, GateDraft, ValidationError, DEFAULT_COLOR};
