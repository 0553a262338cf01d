//! Pantry state: the set of ingredients the user owns, flushed to durable
//! storage on every change and restored at startup.

mod error;
mod pantry;
mod selection;
mod storage;

pub use error::{PantryError, Result};
pub use mixbook_protocol::PANTRY_STORAGE_KEY;
pub use pantry::{Pantry, PantryLoad};
pub use selection::Selection;
pub use storage::{FileStorage, MemoryStorage, PantryStorage, StorageBackend};
