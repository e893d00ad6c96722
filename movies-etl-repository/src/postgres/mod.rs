//! PostgreSQL implementation of the source reader.

mod queries;
mod reader;

pub use reader::PostgresReader;
