use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const APP_NAME: &str = "CallFlow CRM";

/// Bounded waits for each remote call. No retries anywhere; a timeout is
/// surfaced to the user with a manual retry control.
pub const SHEET_FETCH_TIMEOUT: Duration = Duration::from_secs(15);
pub const SHEET_UPDATE_TIMEOUT: Duration = Duration::from_secs(15);
pub const DRIVE_UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

const SHEET_ID_PLACEHOLDER: &str = "YOUR_SHEET_ID_HERE";
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";
const FOLDER_ID_PLACEHOLDER: &str = "YOUR_DRIVE_FOLDER_ID_HERE";
const WEBHOOK_ID_PLACEHOLDER: &str = "YOUR_WEBHOOK_DEPLOYMENT_ID_HERE";

/// Google backend identifiers, supplied through the environment.
///
/// Reading the environment never fails; each accessor validates its value
/// at call time so a missing identifier fails fast with a config error
/// instead of sending a doomed request.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    sheet_id: String,
    pub sheet_name: String,
    api_key: String,
    drive_folder_id: String,
    webhook_deployment_id: String,
}

impl GoogleConfig {
    pub fn from_env() -> Self {
        Self {
            sheet_id: env_or("GOOGLE_SHEET_ID", SHEET_ID_PLACEHOLDER),
            sheet_name: env_or("GOOGLE_SHEET_NAME", "Sheet1"),
            api_key: env_or("GOOGLE_API_KEY", API_KEY_PLACEHOLDER),
            drive_folder_id: env_or("GOOGLE_DRIVE_FOLDER_ID", FOLDER_ID_PLACEHOLDER),
            webhook_deployment_id: env_or(
                "SHEET_WEBHOOK_DEPLOYMENT_ID",
                WEBHOOK_ID_PLACEHOLDER,
            ),
        }
    }

    pub fn sheet_id(&self) -> AppResult<&str> {
        require(&self.sheet_id, SHEET_ID_PLACEHOLDER, "Google Sheet ID")
    }

    pub fn api_key(&self) -> AppResult<&str> {
        require(&self.api_key, API_KEY_PLACEHOLDER, "Google API key")
    }

    pub fn drive_folder_id(&self) -> AppResult<&str> {
        require(&self.drive_folder_id, FOLDER_ID_PLACEHOLDER, "Drive folder ID")
    }

    pub fn webhook_deployment_id(&self) -> AppResult<&str> {
        require(
            &self.webhook_deployment_id,
            WEBHOOK_ID_PLACEHOLDER,
            "Sheet webhook deployment ID",
        )
    }

    /// Exec URL of the Apps Script deployment that handles row writes and
    /// audio uploads.
    pub fn webhook_url(&self) -> AppResult<String> {
        Ok(format!(
            "https://script.google.com/macros/s/{}/exec",
            self.webhook_deployment_id()?
        ))
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            sheet_id: "test-sheet".into(),
            sheet_name: "Sheet1".into(),
            api_key: "test-key".into(),
            drive_folder_id: "test-folder".into(),
            webhook_deployment_id: "test-deployment".into(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn require<'a>(value: &'a str, placeholder: &str, what: &str) -> AppResult<&'a str> {
    if value.is_empty() || value == placeholder {
        Err(AppError::config(format!(
            "{what} is not configured. Set the corresponding environment variable."
        )))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_sheet_id_is_a_config_error() {
        let config = GoogleConfig {
            sheet_id: SHEET_ID_PLACEHOLDER.into(),
            sheet_name: "Sheet1".into(),
            api_key: "key".into(),
            drive_folder_id: "folder".into(),
            webhook_deployment_id: "deploy".into(),
        };

        let err = config.sheet_id().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("Google Sheet ID"));
    }

    #[test]
    fn configured_values_pass_through() {
        let config = GoogleConfig::for_tests();
        assert_eq!(config.sheet_id().unwrap(), "test-sheet");
        assert_eq!(
            config.webhook_url().unwrap(),
            "https://script.google.com/macros/s/test-deployment/exec"
        );
    }
}
