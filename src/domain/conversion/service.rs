use super::dto::{ListenOutcome, Presence, UploadOutcome};
use super::error::ConversionError;
use super::language::Language;
use super::naming;
use crate::infrastructure::audio::AudioPlayer;
use crate::infrastructure::backend::BackendClient;
use chrono::Utc;
use moka::future::Cache;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates the document-to-audio workflow against the conversion
/// backend: upload, presence polling, playback and download.
///
/// A listen call supersedes any listen still in flight. The superseded call
/// stops before touching the player, so only the newest request is heard.
pub struct ConversionService {
    backend: Arc<BackendClient>,
    player: Arc<dyn AudioPlayer>,
    bucket_url: String,
    output_dir: PathBuf,
    poll_attempts: u32,
    poll_interval: Duration,
    playback_epoch: AtomicU64,
    presence_cache: Option<Cache<String, ()>>,
}

impl ConversionService {
    pub fn new(
        backend: Arc<BackendClient>,
        player: Arc<dyn AudioPlayer>,
        bucket_url: String,
        output_dir: PathBuf,
        poll_attempts: u32,
        poll_interval: Duration,
        cache_enabled: bool,
    ) -> Self {
        // Initialize cache if enabled
        let presence_cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(1000)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            backend,
            player,
            bucket_url,
            output_dir,
            poll_attempts,
            poll_interval,
            playback_epoch: AtomicU64::new(0),
            presence_cache,
        }
    }

    /// Upload a document for conversion.
    ///
    /// The document is read from disk and sent whole. Conversion starts on
    /// the backend once the upload lands, one audio file per language.
    pub async fn upload_document(&self, path: &Path) -> Result<UploadOutcome, ConversionError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ConversionError::Invalid(format!("not a usable file name: {}", path.display()))
            })?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ConversionError::Invalid(format!("cannot read {}: {}", path.display(), e)))?;

        tracing::info!(
            file_name = %file_name,
            size_bytes = bytes.len(),
            "Uploading document for conversion"
        );

        let receipt = self.backend.upload(&file_name, bytes).await?;

        if !receipt.confirmed() {
            tracing::warn!(
                file_name = %file_name,
                "Backend accepted the upload without confirming it"
            );
        }

        Ok(UploadOutcome {
            file_name,
            confirmed: receipt.confirmed(),
            uploaded_at: Utc::now(),
        })
    }

    /// Check once whether converted audio exists for a document and language.
    pub async fn check(
        &self,
        document_name: &str,
        language: Language,
    ) -> Result<Presence, ConversionError> {
        let audio_file = naming::audio_file_name(document_name, language);

        // Check cache first (if enabled)
        if let Some(cache) = &self.presence_cache {
            if cache.get(&audio_file).await.is_some() {
                tracing::debug!(filename = %audio_file, "Presence cache hit");
                return Ok(Presence::Present);
            }
        }

        let presence = self.backend.find(&audio_file).await?;

        // Presence is stable once reached, absence is not. Only hits are cached.
        if presence.is_present() {
            if let Some(cache) = &self.presence_cache {
                cache.insert(audio_file, ()).await;
            }
        }

        Ok(presence)
    }

    /// Poll until the converted audio for a document and language exists.
    ///
    /// Find lookups are idempotent, so the wait retries up to the configured
    /// number of attempts before giving up with [`ConversionError::NotReady`].
    /// Returns the converted audio file name.
    pub async fn wait_until_present(
        &self,
        document_name: &str,
        language: Language,
    ) -> Result<String, ConversionError> {
        let audio_file = naming::audio_file_name(document_name, language);

        for attempt in 1..=self.poll_attempts {
            if self.check(document_name, language).await?.is_present() {
                tracing::info!(filename = %audio_file, attempt, "Converted audio is ready");
                return Ok(audio_file);
            }

            if attempt < self.poll_attempts {
                tracing::info!(
                    filename = %audio_file,
                    attempt,
                    max_attempts = self.poll_attempts,
                    "Converted audio not ready yet"
                );
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        Err(ConversionError::NotReady(audio_file))
    }

    /// Claim the playback epoch for a new listen request.
    ///
    /// The newest epoch wins. A caller that hands the listen to a background
    /// task claims the epoch first, so request order decides which listen is
    /// newest even before the task runs.
    pub fn begin_listen(&self) -> u64 {
        self.playback_epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Resolve, play and optionally save the converted audio for a document.
    ///
    /// Playback streams from the bucket while the optional download fetches
    /// the bytes through the backend, the two run concurrently. The download
    /// switch is the value snapshotted by the caller when the listen started.
    pub async fn listen(
        &self,
        document_name: &str,
        language: Language,
        download: bool,
    ) -> Result<ListenOutcome, ConversionError> {
        let epoch = self.begin_listen();
        self.listen_with_epoch(document_name, language, download, epoch)
            .await
    }

    /// Run a listen under an epoch claimed with [`Self::begin_listen`].
    pub async fn listen_with_epoch(
        &self,
        document_name: &str,
        language: Language,
        download: bool,
        epoch: u64,
    ) -> Result<ListenOutcome, ConversionError> {
        tracing::info!(
            document = %document_name,
            language = %language,
            download,
            "Listen requested"
        );

        let audio_file = self.wait_until_present(document_name, language).await?;
        let audio_url = self.playback_url(&audio_file);

        // A newer listen moved the epoch while this one was waiting
        if self.playback_epoch.load(Ordering::SeqCst) != epoch {
            tracing::info!(
                filename = %audio_file,
                "Listen superseded by a newer request"
            );
            return Ok(ListenOutcome {
                audio_file,
                audio_url,
                saved_to: None,
                superseded: true,
            });
        }

        let play = async {
            self.player
                .play(&audio_url)
                .await
                .map_err(ConversionError::Playback)
        };

        let save = async {
            if download {
                self.download_to_disk(&audio_file).await.map(Some)
            } else {
                Ok(None)
            }
        };

        let (played, saved_to) = tokio::join!(play, save);

        if let Err(err) = played {
            if let Ok(Some(path)) = &saved_to {
                tracing::warn!(
                    path = %path.display(),
                    "Playback failed, the saved audio is still on disk"
                );
            }
            return Err(err);
        }

        Ok(ListenOutcome {
            audio_file,
            audio_url,
            saved_to: saved_to?,
            superseded: false,
        })
    }

    /// Download the converted audio for a document into the output directory.
    ///
    /// Checks presence once and fails with [`ConversionError::NotReady`] when
    /// the conversion has not finished. Returns the written path.
    pub async fn fetch(
        &self,
        document_name: &str,
        language: Language,
    ) -> Result<PathBuf, ConversionError> {
        let audio_file = naming::audio_file_name(document_name, language);

        if !self.check(document_name, language).await?.is_present() {
            return Err(ConversionError::NotReady(audio_file));
        }

        self.download_to_disk(&audio_file).await
    }

    /// Public URL the converted audio streams from
    pub fn playback_url(&self, audio_file: &str) -> String {
        naming::bucket_object_url(&self.bucket_url, audio_file)
    }

    async fn download_to_disk(&self, audio_file: &str) -> Result<PathBuf, ConversionError> {
        let bytes = self.backend.download(audio_file).await?;

        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            ConversionError::Dependency(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let target = self.output_dir.join(audio_file);
        tokio::fs::write(&target, &bytes).await.map_err(|e| {
            ConversionError::Dependency(format!("cannot write {}: {}", target.display(), e))
        })?;

        tracing::info!(
            filename = %audio_file,
            path = %target.display(),
            size_bytes = bytes.len(),
            "Saved converted audio"
        );

        Ok(target)
    }
}
