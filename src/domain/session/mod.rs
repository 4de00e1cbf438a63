use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Document currently selected in an interactive session
#[derive(Debug, Clone)]
pub struct SelectedSource {
    pub file_name: String,
    pub path: PathBuf,
}

/// State of one interactive console session.
///
/// Selecting a document replaces the previous selection and forgets its
/// upload. The download switch starts on and applies to playbacks started
/// after it was flipped, a playback already running keeps the value it
/// snapshotted.
#[derive(Debug)]
pub struct SessionState {
    selected: Option<SelectedSource>,
    download_audio: bool,
    uploaded_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            selected: None,
            download_audio: true,
            uploaded_at: None,
        }
    }

    pub fn select(&mut self, file_name: String, path: PathBuf) {
        self.selected = Some(SelectedSource { file_name, path });
        self.uploaded_at = None;
    }

    pub fn selected(&self) -> Option<&SelectedSource> {
        self.selected.as_ref()
    }

    pub fn mark_uploaded(&mut self, at: DateTime<Utc>) {
        self.uploaded_at = Some(at);
    }

    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        self.uploaded_at
    }

    pub fn set_download(&mut self, enabled: bool) {
        self.download_audio = enabled;
    }

    pub fn download_enabled(&self) -> bool {
        self.download_audio
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
