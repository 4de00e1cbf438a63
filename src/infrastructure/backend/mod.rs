use crate::domain::conversion::dto::{Presence, UploadResponse};
use crate::error::{AppError, AppResult};
use reqwest::multipart;
use uuid::Uuid;

const UPLOAD_PATH: &str = "/file/upload";
const FIND_PATH: &str = "/file/find/";
const DOWNLOAD_PATH: &str = "/file/download/";

const X_REQUEST_ID_HEADER: &str = "x-request-id";

/// Gateway to the document conversion backend.
///
/// Covers the three endpoints the backend exposes: multipart upload of a
/// source document, a find lookup for the converted audio, and a binary
/// download of that audio. Every request carries a fresh `x-request-id`
/// header for correlation with backend logs.
pub struct BackendClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: String, http_client: reqwest::Client) -> Self {
        Self {
            base_url,
            http_client,
        }
    }

    /// Upload a document for conversion.
    ///
    /// The form carries exactly two parts, `file` with the document bytes
    /// and `fileName` with its name, in that order.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<UploadResponse> {
        let request_id = Uuid::new_v4();

        let part = multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = multipart::Form::new()
            .part("file", part)
            .text("fileName", file_name.to_owned());

        tracing::debug!(
            request_id = %request_id,
            file_name = %file_name,
            "Uploading document"
        );

        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, UPLOAD_PATH))
            .header(X_REQUEST_ID_HEADER, request_id.to_string())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Backend(format!(
                "upload returned {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let receipt = serde_json::from_str::<UploadResponse>(&body).unwrap_or_else(|e| {
            tracing::warn!(
                request_id = %request_id,
                error = %e,
                "Upload response was not the expected JSON shape"
            );
            UploadResponse::default()
        });

        Ok(receipt)
    }

    /// Ask the backend whether a converted audio file exists.
    pub async fn find(&self, audio_file: &str) -> AppResult<Presence> {
        let request_id = Uuid::new_v4();

        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, FIND_PATH))
            .query(&[("filename", audio_file)])
            .header(X_REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Backend(format!(
                "find returned {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let presence = Presence::from_body(&body);

        tracing::debug!(
            request_id = %request_id,
            filename = %audio_file,
            present = presence.is_present(),
            "Checked converted audio"
        );

        Ok(presence)
    }

    /// Download a converted audio file as raw bytes.
    pub async fn download(&self, audio_file: &str) -> AppResult<Vec<u8>> {
        let request_id = Uuid::new_v4();

        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, DOWNLOAD_PATH))
            .query(&[("filename", audio_file)])
            .header(X_REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Backend(format!(
                "download returned {}: {}",
                status, error_text
            )));
        }

        let bytes = response.bytes().await?;

        tracing::debug!(
            request_id = %request_id,
            filename = %audio_file,
            size_bytes = bytes.len(),
            "Downloaded converted audio"
        );

        Ok(bytes.to_vec())
    }
}
