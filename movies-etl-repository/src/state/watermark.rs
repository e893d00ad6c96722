//! Watermark: the timestamp up to which changes are synchronized.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use super::State;
use crate::errors::StateError;
use crate::interfaces::StateStorage;

/// State key holding the watermark as an ISO-8601 string.
pub const WATERMARK_KEY: &str = "timestamp";

/// Durable "last synchronized" timestamp.
///
/// `None` means nothing has been synchronized yet, so every row counts as
/// changed.
pub struct Watermark {
    state: State,
}

impl Watermark {
    /// Load the watermark from `storage`.
    pub async fn load(storage: Arc<dyn StateStorage>) -> Result<Self, StateError> {
        Ok(Self {
            state: State::load(storage).await?,
        })
    }

    /// The current watermark.
    ///
    /// A value that cannot be parsed is treated as absent, which triggers a
    /// full re-sync rather than skipping changes.
    pub fn get(&self) -> Option<DateTime<Utc>> {
        let raw = self.state.get(WATERMARK_KEY)?;

        let parsed = raw.as_str().and_then(parse_timestamp);
        if parsed.is_none() {
            warn!(value = %raw, "Ignoring unparseable watermark");
        }
        parsed
    }

    /// Persist a new watermark.
    pub async fn set(&mut self, timestamp: DateTime<Utc>) -> Result<(), StateError> {
        self.state
            .set(WATERMARK_KEY, Value::String(timestamp.to_rfc3339()))
            .await?;
        info!(watermark = %timestamp.to_rfc3339(), "Watermark advanced");
        Ok(())
    }
}

/// Parse RFC 3339, falling back to a naive ISO-8601 timestamp read as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
