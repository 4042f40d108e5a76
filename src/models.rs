//! Data models for the note editor.
//!
//! These mirror the JSON shapes exchanged with the external notes and users
//! service, plus the snapshot the session loader hands to the editor.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier assigned by the external service.
///
/// The service is free to hand out numeric or string ids, so both are accepted
/// and rendered the same way in URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Text(s.to_string())
    }
}

/// The service sends `null` for blank text fields; treat it as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Notes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

/// Request payload for creating or updating a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteBody {
    pub body: String,
}

// ============================================================================
// People
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
}

impl Person {
    pub fn new(id: i64, first_name: &str) -> Self {
        Self {
            id: Id::Number(id),
            first_name: first_name.to_string(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.first_name
    }

    pub fn has_display_name(&self) -> bool {
        !self.first_name.is_empty()
    }
}

// ============================================================================
// Session Snapshot
// ============================================================================

/// Everything the editor needs at startup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionData {
    /// The most recently created note, if the service had one.
    pub note: Option<Note>,
    pub users: Vec<Person>,
}

impl SessionData {
    pub fn initial_text(&self) -> &str {
        self.note.as_ref().map(|n| n.body.as_str()).unwrap_or("")
    }

    pub fn initial_id(&self) -> Option<&Id> {
        self.note.as_ref().and_then(|n| n.id.as_ref())
    }
}
