use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://cc-project-lb-1364801742.us-east-1.elb.amazonaws.com";
const DEFAULT_BUCKET_URL: &str = "https://cc-audio-bucket.s3.amazonaws.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub bucket_url: String,
    pub request_timeout_secs: u64,
    pub poll_attempts: u32,
    pub poll_interval_secs: u64,
    pub output_dir: PathBuf,
    pub audio_player: Option<String>,
    pub presence_cache_enabled: bool,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            bucket_url: env::var("AUDIO_BUCKET_URL")
                .unwrap_or_else(|_| DEFAULT_BUCKET_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            poll_attempts: env::var("FIND_POLL_ATTEMPTS")
                .unwrap_or_else(|_| "12".to_string())
                .parse()?,
            poll_interval_secs: env::var("FIND_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            audio_player: env::var("AUDIO_PLAYER").ok(),
            presence_cache_enabled: env::var("PRESENCE_CACHE_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }

    /// Apply the command line override of the backend address.
    ///
    /// Flags win over the environment; the value is normalized the same way
    /// `BACKEND_URL` is.
    pub fn apply_server_override(&mut self, server: Option<&str>) {
        if let Some(server) = server {
            self.backend_url = server.trim_end_matches('/').to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
