use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::keys::HISTORY_VERSION;
use crate::models::record::TranslationRecord;

/// The document persisted under [`crate::keys::HISTORY`].
///
/// Records are kept in insertion order, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDocument {
    /// Layout version. Missing or 0 = pre-versioned bare array.
    #[serde(default)]
    pub version: u32,
    pub records: Vec<TranslationRecord>,
}

impl HistoryDocument {
    pub fn new(records: Vec<TranslationRecord>) -> Self {
        Self {
            version: HISTORY_VERSION,
            records,
        }
    }

    /// Serialize, always stamping the current layout version.
    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        let stamped = HistoryDocumentRef {
            version: HISTORY_VERSION,
            records: &self.records,
        };
        Ok(serde_json::to_vec(&stamped)?)
    }

    /// Parse stored bytes, migrating older layouts to the current one.
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        // Parse as raw JSON first so older layouts can be migrated before
        // deserializing into the typed document.
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        let on_disk_version = match &json {
            serde_json::Value::Array(_) => 0,
            serde_json::Value::Object(obj) => obj
                .get("version")
                .and_then(|v| v.as_u64())
                .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
                .unwrap_or(0),
            other => {
                return Err(CoreError::MalformedDocument(format!(
                    "expected an object or array, found {}",
                    json_kind(other)
                )));
            }
        };

        let migrated = migrate(json, on_disk_version)?;
        let doc: HistoryDocument = serde_json::from_value(migrated)?;

        let mut seen = HashSet::with_capacity(doc.records.len());
        if let Some(dup) = doc.records.iter().find(|r| !seen.insert(r.id())) {
            return Err(CoreError::MalformedDocument(format!(
                "record id {} appears more than once",
                dup.id()
            )));
        }

        Ok(doc)
    }
}

/// Borrowing twin of [`HistoryDocument`] so encoding never clones records.
#[derive(Serialize)]
struct HistoryDocumentRef<'a> {
    version: u32,
    records: &'a [TranslationRecord],
}

/// Run sequential migrations from `from_version` up to [`HISTORY_VERSION`].
fn migrate(json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > HISTORY_VERSION {
        return Err(CoreError::UnsupportedVersion {
            found: from_version,
            supported: HISTORY_VERSION,
        });
    }

    let mut json = json;

    // v0 → v1: bare record array wrapped in a versioned envelope
    if from_version < 1 {
        json = match json {
            serde_json::Value::Array(records) => serde_json::json!({
                "version": 1,
                "records": records,
            }),
            serde_json::Value::Object(mut obj) => {
                obj.insert("version".to_string(), serde_json::Value::Number(1.into()));
                serde_json::Value::Object(obj)
            }
            other => other,
        };
    }

    Ok(json)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
