//! `/export`: write the conversation to a JSON file.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use parley_types::chat::{Message, SessionId};

/// Serialized transcript layout.
#[derive(Debug, Serialize)]
pub struct Transcript<'a> {
    pub session_id: Option<&'a SessionId>,
    pub campaign: Option<&'a str>,
    pub exported_at: DateTime<Utc>,
    pub messages: &'a [Message],
}

/// Write `transcript` as pretty JSON, creating parent directories as needed.
pub async fn write_transcript(path: &Path, transcript: &Transcript<'_>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(transcript)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
