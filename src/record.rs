use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Identity of a stored record. Millisecond timestamps, bumped when two
/// records are created within the same millisecond.
pub type RecordId = u64;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Hand out a fresh id, strictly greater than any previously issued in this process.
pub fn next_id() -> RecordId {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let previous = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    now.max(previous + 1)
}

/// Note an id that already exists, so later ids are issued above it.
pub fn observe_id(id: RecordId) {
    LAST_ID.fetch_max(id, Ordering::SeqCst);
}

/// The unit that every panel produces and every collection stores.
///
/// Only `id` and `hex` are always present. Records from the remote service
/// carry the auxiliary representations; mix records carry their inputs and a
/// creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRecord {
    pub id: RecordId,
    /// Canonical `#rrggbb`.
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmyk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<String>,
    /// What the user typed to find this color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searched: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_inputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ColorRecord {
    /// A bare record with a fresh id. Collections canonicalize `hex` on save.
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            id: next_id(),
            hex: hex.into(),
            name: None,
            rgb: None,
            hsl: None,
            cmyk: None,
            contrast: None,
            searched: None,
            source_inputs: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether this record was produced by mixing.
    pub fn is_mix(&self) -> bool {
        !self.source_inputs.is_empty()
    }
}
