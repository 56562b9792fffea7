mod auth;
mod config;
mod dashboard;
mod drive;
mod error;
mod leads;
mod outcome;
mod sheets;
mod utils;

use std::sync::Arc;

use log::info;
use tauri::Manager;

use auth::commands::{current_user, login, logout};
use auth::{AuthController, SessionStore, StaticCredentials, SESSION_FILE};
use config::GoogleConfig;
use dashboard::commands::{
    audio_required_for_status, get_dashboard, get_outcome_form, list_call_statuses, load_leads,
    set_outcome_audio, set_outcome_comment, set_outcome_status, submit_outcome,
};
use dashboard::DashboardController;
use drive::DriveClient;
use sheets::SheetsClient;

pub(crate) struct AppState {
    pub(crate) auth: AuthController,
    pub(crate) dashboard: DashboardController,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("{} starting up...", config::APP_NAME);

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                // Rehydrate the previous session, if any.
                let session_store = SessionStore::new(app_data_dir.join(SESSION_FILE))?;
                let auth =
                    AuthController::new(Arc::new(StaticCredentials::new()), session_store);
                if let Some(user) = auth.current_user() {
                    info!("Restored session for {}", user.username);
                }

                let google = GoogleConfig::from_env();
                let http = reqwest::Client::new();
                let dashboard = DashboardController::new(
                    SheetsClient::new(http.clone(), google.clone()),
                    DriveClient::new(http, google),
                );

                app.manage(AppState { auth, dashboard });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            login,
            logout,
            current_user,
            load_leads,
            get_dashboard,
            set_outcome_status,
            set_outcome_comment,
            set_outcome_audio,
            get_outcome_form,
            submit_outcome,
            list_call_statuses,
            audio_required_for_status,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
