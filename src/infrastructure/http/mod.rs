use crate::error::AppResult;
use crate::infrastructure::config::Config;

/// Build the HTTP client shared by every backend call.
///
/// Every request inherits the bounded timeout from [`Config::request_timeout`].
pub fn build_http_client(config: &Config) -> AppResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("docspeak/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}
