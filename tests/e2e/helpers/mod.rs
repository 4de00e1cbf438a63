use anyhow::Result;
use docspeak::domain::conversion::ConversionService;
use docspeak::infrastructure::audio::AudioPlayer;
use docspeak::infrastructure::backend::BackendClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;


use players::RecordingPlayer;
use stub_backend::StubBackend;

pub struct TestContext {
    pub service: Arc<ConversionService>,
    pub stub: StubBackend,
    pub player: Arc<RecordingPlayer>,
    pub output_dir: PathBuf,
}

impl TestContext {
    /// Stub backend plus a service wired to it, with short poll settings
    pub async fn new() -> Result<Self> {
        Self::with_polling(4, Duration::from_millis(10), false).await
    }

    pub async fn with_polling(
        poll_attempts: u32,
        poll_interval: Duration,
        cache_enabled: bool,
    ) -> Result<Self> {
        let stub = StubBackend::start().await?;
        let player = Arc::new(RecordingPlayer::new());
        let output_dir = std::env::temp_dir().join(format!("docspeak-test-{}", Uuid::new_v4()));

        let service = build_service(
            &stub,
            player.clone(),
            &output_dir,
            poll_attempts,
            poll_interval,
            cache_enabled,
        )?;

        Ok(Self {
            service,
            stub,
            player,
            output_dir,
        })
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.output_dir);
    }
}

/// Wire a real ConversionService to a stub backend
pub fn build_service(
    stub: &StubBackend,
    player: Arc<dyn AudioPlayer>,
    output_dir: &Path,
    poll_attempts: u32,
    poll_interval: Duration,
    cache_enabled: bool,
) -> Result<Arc<ConversionService>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let backend = Arc::new(BackendClient::new(stub.base_url.clone(), http_client));

    Ok(Arc::new(ConversionService::new(
        backend,
        player,
        "https://bucket.test".to_string(),
        output_dir.to_path_buf(),
        poll_attempts,
        poll_interval,
        cache_enabled,
    )))
}
