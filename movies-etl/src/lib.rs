//! # Movies ETL
//!
//! Main library for the movies ETL.
//!
//! This crate provides the settings, logging setup and dependency wiring
//! used by the `movies-etl` binary.

pub mod config;
pub mod logging;

pub use config::{Dependencies, Settings};
pub use logging::LogFormat;

use thiserror::Error;

/// Errors that can occur during ETL initialization or execution.
#[derive(Error, Debug)]
pub enum EtlError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] movies_etl_pipeline::PipelineError),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] movies_etl_repository::SearchIndexError),

    /// State error.
    #[error("State error: {0}")]
    StateError(#[from] movies_etl_repository::StateError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EtlError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
