use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Answer the backend gives for a find lookup when the audio exists
pub const AUDIO_PRESENT: &str = "audio file present";
/// Answer the backend gives while the conversion is still running
pub const AUDIO_NOT_GENERATED: &str = "audio file not generated yet";
/// Answer the backend gives when the filename query parameter is blank
pub const FILENAME_EMPTY: &str = "filename is empty";

/// Body of a find response, `{"found": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct FindResponse {
    pub found: String,
}

/// Body of an upload response, `{"file_uploaded": "true"}`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub file_uploaded: Option<String>,
}

impl UploadResponse {
    pub fn confirmed(&self) -> bool {
        self.file_uploaded.as_deref() == Some("true")
    }
}

/// Whether converted audio exists for a document and language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    NotReady,
}

impl Presence {
    /// Interpret a find response body.
    ///
    /// Bodies that do not parse as [`FindResponse`] fall back to a substring
    /// check so plain-text answers from older backends keep working.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<FindResponse>(body) {
            Ok(reply) if reply.found == AUDIO_PRESENT => Presence::Present,
            Ok(reply) => {
                if reply.found != AUDIO_NOT_GENERATED && reply.found != FILENAME_EMPTY {
                    tracing::warn!(
                        found = %reply.found,
                        "Unrecognized find answer, treating audio as not ready"
                    );
                }
                Presence::NotReady
            }
            Err(_) => {
                tracing::warn!("Find response was not JSON, falling back to substring match");
                if body.contains(AUDIO_PRESENT) {
                    Presence::Present
                } else {
                    Presence::NotReady
                }
            }
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Presence::Present)
    }
}

/// Outcome of uploading a document
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub file_name: String,
    pub confirmed: bool,
    pub uploaded_at: DateTime<Utc>,
}

/// Outcome of a listen request
#[derive(Debug, Clone)]
pub struct ListenOutcome {
    pub audio_file: String,
    pub audio_url: String,
    pub saved_to: Option<PathBuf>,
    pub superseded: bool,
}
