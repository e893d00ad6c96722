//! Persistent ETL state.
//!
//! The state is a flat key/value snapshot kept in a single JSON file and
//! rewritten wholesale on every update.

mod json_file;
mod memory;
mod store;
mod watermark;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use store::State;
pub use watermark::{Watermark, WATERMARK_KEY};
