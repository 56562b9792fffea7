use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{GoogleConfig, SHEET_FETCH_TIMEOUT, SHEET_UPDATE_TIMEOUT};
use crate::error::{AppError, AppResult};
use crate::leads::{validate_header, Lead};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// `values` payload of the Sheets API read: a 2-D array of string cells.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SheetsApiError {
    error: Option<SheetsApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct SheetsApiErrorBody {
    message: Option<String>,
}

/// Response body of the Apps Script webhook. The webhook always answers
/// 200 with an application-level `success` flag, but some deployments
/// return plain text, so every field is optional.
#[derive(Debug, Deserialize)]
struct WebhookResponse {
    success: Option<bool>,
    error: Option<String>,
}

/// One outcome row, as the webhook expects it.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeWrite {
    pub row_index: usize,
    pub status: String,
    pub comment: String,
    pub caller_username: String,
    pub calling_date_time: String,
    pub recording_url: String,
    pub recording_length: String,
}

impl OutcomeWrite {
    pub fn new(
        row_index: usize,
        status: &str,
        comment: &str,
        caller_username: &str,
        recording_url: Option<&str>,
        recording_length: &str,
    ) -> Self {
        Self {
            row_index,
            status: status.to_string(),
            comment: comment.to_string(),
            caller_username: caller_username.to_string(),
            calling_date_time: Utc::now().to_rfc3339(),
            recording_url: normalize_recording_url(recording_url),
            recording_length: recording_length.to_string(),
        }
    }
}

/// The sheet must never receive an ambiguous empty cell for the
/// recording URL; absent recordings become the literal `NA`.
pub fn normalize_recording_url(url: Option<&str>) -> String {
    match url {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => "NA".to_string(),
    }
}

/// Stateless client over the spreadsheet backend: one read endpoint for
/// the lead list, one webhook for row write-back. No retries; every
/// failure is surfaced for a manual retry.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl SheetsClient {
    pub fn new(http: reqwest::Client, config: GoogleConfig) -> Self {
        Self { http, config }
    }

    /// Fetch every row of the sheet in order. Row 0 is the header and is
    /// checked against the fixed positional contract before the data
    /// rows are mapped into leads.
    pub async fn fetch_leads(&self) -> AppResult<Vec<Lead>> {
        let sheet_id = self.config.sheet_id()?;
        let api_key = self.config.api_key()?;

        let url = format!(
            "{SHEETS_API_BASE}/{sheet_id}/values/{}?key={api_key}",
            self.config.sheet_name
        );

        let response = self
            .http
            .get(&url)
            .timeout(SHEET_FETCH_TIMEOUT)
            .send()
            .await
            .map_err(AppError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<SheetsApiError>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("Failed to fetch sheet data: {status}"));
            return Err(AppError::remote(message));
        }

        let range: ValueRange = response.json().await.map_err(AppError::from_transport)?;

        let mut rows = range.values.into_iter();
        let header = match rows.next() {
            Some(header) => header,
            None => return Ok(Vec::new()),
        };
        validate_header(&header)?;

        // First data row sits at spreadsheet row 2.
        let leads: Vec<Lead> = rows
            .enumerate()
            .map(|(i, cells)| Lead::from_row(i + 2, &cells))
            .collect();

        info!("Fetched {} leads from sheet", leads.len());
        Ok(leads)
    }

    /// Write one row's outcome fields back, keyed by row position. Last
    /// writer wins; there is no check against the row's prior state.
    pub async fn write_outcome(&self, outcome: &OutcomeWrite) -> AppResult<()> {
        let url = self.config.webhook_url()?;

        let response = self
            .http
            .post(&url)
            .timeout(SHEET_UPDATE_TIMEOUT)
            .json(outcome)
            .send()
            .await
            .map_err(AppError::from_transport)?;

        let status = response.status();
        let text = response.text().await.map_err(AppError::from_transport)?;

        if !status.is_success() {
            let message = if text.trim().is_empty() {
                "Failed to update lead".to_string()
            } else {
                text
            };
            return Err(AppError::remote(message));
        }

        // The webhook reports application-level failure in the body.
        if let Ok(body) = serde_json::from_str::<WebhookResponse>(&text) {
            if body.success == Some(false) {
                return Err(AppError::remote(
                    body.error.unwrap_or_else(|| "Failed to update lead".into()),
                ));
            }
        }

        info!("Wrote outcome for row {}", outcome.row_index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_recording_url_becomes_the_na_sentinel() {
        assert_eq!(normalize_recording_url(None), "NA");
        assert_eq!(normalize_recording_url(Some("")), "NA");
        assert_eq!(normalize_recording_url(Some("   ")), "NA");
        assert_eq!(
            normalize_recording_url(Some("https://drive.google.com/f/1")),
            "https://drive.google.com/f/1"
        );
    }

    #[test]
    fn write_payload_serializes_camel_case_with_sentinel() {
        let outcome = OutcomeWrite::new(7, "Not Interested", "no budget", "agent@example.com", None, "00:00:00");
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["rowIndex"], 7);
        assert_eq!(json["status"], "Not Interested");
        assert_eq!(json["callerUsername"], "agent@example.com");
        assert_eq!(json["recordingUrl"], "NA");
        assert_eq!(json["recordingLength"], "00:00:00");
        assert!(json["callingDateTime"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn webhook_failure_body_is_detected() {
        let body: WebhookResponse =
            serde_json::from_str(r#"{"success":false,"error":"row locked"}"#).unwrap();
        assert_eq!(body.success, Some(false));
        assert_eq!(body.error.as_deref(), Some("row locked"));

        let ok: WebhookResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(ok.success, Some(true));
    }

    #[test]
    fn value_range_defaults_to_no_rows() {
        let range: ValueRange = serde_json::from_str("{}").unwrap();
        assert!(range.values.is_empty());
    }
}
