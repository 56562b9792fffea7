use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{GoogleConfig, DRIVE_UPLOAD_TIMEOUT};
use crate::error::{AppError, AppResult};
use crate::outcome::AudioFile;

/// Derive the stored filename for a recording:
/// `<digits-of-phone>-<YYYYMMDD-HHMMSS>.mp3`. Everything but digits and
/// a leading `+` is stripped from the phone number.
pub fn audio_filename(phone: &str, now: DateTime<Utc>) -> String {
    let clean: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    format!("{clean}-{}.mp3", now.format("%Y%m%d-%H%M%S"))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct UploadRequest {
    action: &'static str,
    mobile_number: String,
    file_name: String,
    folder_id: String,
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizeRequest {
    action: &'static str,
    file_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: Option<bool>,
    url: Option<String>,
    file_id: Option<String>,
    error: Option<String>,
}

/// Uploads recordings to the Drive folder behind the Apps Script
/// webhook. Two-step protocol: transfer the payload, then authorize
/// public read on the created object. Single attempt, no retry.
#[derive(Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl DriveClient {
    pub fn new(http: reqwest::Client, config: GoogleConfig) -> Self {
        Self { http, config }
    }

    /// Upload one recording and return its shareable URL.
    pub async fn upload(&self, audio: &AudioFile, phone: &str) -> AppResult<String> {
        let url = self.config.webhook_url()?;
        let folder_id = self.config.drive_folder_id()?.to_string();

        let bytes = tokio::fs::read(&audio.path)
            .await
            .map_err(|err| anyhow::anyhow!("Failed to read audio file: {err}"))?;

        let request = UploadRequest {
            action: "uploadAudio",
            mobile_number: phone.to_string(),
            file_name: audio_filename(phone, Utc::now()),
            folder_id,
            mime_type: audio.mime_type.clone(),
            data: BASE64.encode(&bytes),
        };

        let response = self
            .http
            .post(&url)
            .timeout(DRIVE_UPLOAD_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(AppError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                format!("Upload failed: {status}")
            } else {
                text
            };
            return Err(AppError::remote(message));
        }

        let body: UploadResponse = response.json().await.map_err(AppError::from_transport)?;

        if body.success != Some(true) {
            return Err(AppError::remote(
                body.error.unwrap_or_else(|| "Upload failed".into()),
            ));
        }

        let file_url = body
            .url
            .ok_or_else(|| AppError::remote("Upload response missing file URL"))?;

        // Newly created objects are private; deployments that don't
        // share server-side return the file id so we can authorize
        // public read as a second call.
        if let Some(file_id) = body.file_id {
            self.authorize_public_read(&url, file_id).await?;
        }

        info!("Uploaded recording {}", file_url);
        Ok(file_url)
    }

    async fn authorize_public_read(&self, url: &str, file_id: String) -> AppResult<()> {
        let response = self
            .http
            .post(url)
            .timeout(DRIVE_UPLOAD_TIMEOUT)
            .json(&AuthorizeRequest {
                action: "setPublicAccess",
                file_id,
            })
            .send()
            .await
            .map_err(AppError::from_transport)?;

        if !response.status().is_success() {
            return Err(AppError::remote(format!(
                "Failed to make recording public: {}",
                response.status()
            )));
        }

        let body: UploadResponse = response.json().await.map_err(AppError::from_transport)?;
        if body.success == Some(false) {
            return Err(AppError::remote(body.error.unwrap_or_else(|| {
                "Failed to make recording public".into()
            })));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_strips_formatting_from_the_phone_number() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(
            audio_filename("+1 (555) 010-0199", at),
            "+15550100199-20260314-092653.mp3"
        );
        assert_eq!(audio_filename("555.010.0199", at), "5550100199-20260314-092653.mp3");
    }

    #[test]
    fn upload_request_serializes_camel_case() {
        let request = UploadRequest {
            action: "uploadAudio",
            mobile_number: "+15550100199".into(),
            file_name: "x.mp3".into(),
            folder_id: "folder".into(),
            mime_type: "audio/mpeg".into(),
            data: "AAAA".into(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "uploadAudio");
        assert_eq!(json["mobileNumber"], "+15550100199");
        assert_eq!(json["fileName"], "x.mp3");
        assert_eq!(json["folderId"], "folder");
        assert_eq!(json["mimeType"], "audio/mpeg");
    }

    #[test]
    fn upload_response_tolerates_missing_fields() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"success":true,"url":"https://d/1","fileId":"1"}"#).unwrap();
        assert_eq!(ok.success, Some(true));
        assert_eq!(ok.url.as_deref(), Some("https://d/1"));
        assert_eq!(ok.file_id.as_deref(), Some("1"));

        let bare: UploadResponse = serde_json::from_str("{}").unwrap();
        assert!(bare.success.is_none());
        assert!(bare.error.is_none());
    }
}
