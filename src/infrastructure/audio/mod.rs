use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Player for converted audio.
/// Abstracts the underlying playback mechanism (external player binary,
/// test double, etc.)
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play a single audio URL from start to finish
    ///
    /// # Errors
    /// Returns error if the player process cannot be spawned or exits with
    /// a failure status
    async fn play(&self, url: &str) -> Result<(), String>;
}

/// Plays audio by handing the URL to an external player binary.
///
/// Resolution order is the configured preference first, then `ffplay`,
/// `mpg123` and `mpv` from `PATH`. Without any of them playback degrades
/// to a warning naming the URL.
pub struct ExternalPlayer {
    bin: Option<PathBuf>,
}

impl ExternalPlayer {
    pub fn detect(preference: Option<&str>) -> Self {
        let bin = select_player(preference);

        match &bin {
            Some(path) => {
                tracing::info!(player = %path.display(), "Detected audio player");
            }
            None => {
                tracing::warn!("No audio player found on PATH, playback will be skipped");
            }
        }

        Self { bin }
    }
}

#[async_trait]
impl AudioPlayer for ExternalPlayer {
    async fn play(&self, url: &str) -> Result<(), String> {
        let bin = match &self.bin {
            Some(bin) => bin,
            None => {
                tracing::warn!(url = %url, "No audio player available, open the URL manually");
                return Ok(());
            }
        };

        tracing::info!(player = %bin.display(), url = %url, "Starting playback");

        let status = tokio::process::Command::new(bin)
            .args(playback_args(bin))
            .arg(url)
            .status()
            .await
            .map_err(|e| format!("failed to start {}: {}", bin.display(), e))?;

        if !status.success() {
            return Err(format!("{} exited with {}", bin.display(), status));
        }

        Ok(())
    }
}

fn playback_args(bin: &Path) -> Vec<&'static str> {
    let name = bin.file_name().and_then(|s| s.to_str()).unwrap_or("");
    match name {
        "ffplay" => vec!["-autoexit", "-nodisp", "-loglevel", "error"],
        "mpg123" => vec!["-q"],
        "mpv" => vec!["--no-video", "--really-quiet"],
        _ => Vec::new(),
    }
}

fn select_player(pref: Option<&str>) -> Option<PathBuf> {
    if let Some(p) = pref {
        if let Some(path) = get_from_path(p) {
            return Some(path);
        }
        tracing::warn!(player = %p, "Preferred audio player not found, falling back");
    }

    for candidate in ["ffplay", "mpg123", "mpv"] {
        if let Some(path) = get_from_path(candidate) {
            return Some(path);
        }
    }

    None
}

fn get_from_path(bin: &str) -> Option<PathBuf> {
    if bin.contains(std::path::MAIN_SEPARATOR) {
        let p = PathBuf::from(bin);
        return if p.exists() { Some(p) } else { None };
    }
    if let Some(paths) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&paths) {
            let candidate = dir.join(bin);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }
    None
}
