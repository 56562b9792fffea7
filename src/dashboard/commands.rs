use tauri::State;

use crate::{
    dashboard::{DashboardSnapshot, FormSnapshot},
    outcome::{self, AudioFile, ALL_STATUSES},
    AppState,
};

#[tauri::command]
pub async fn load_leads(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    state.dashboard.load_leads().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_dashboard(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    Ok(state.dashboard.snapshot().await)
}

#[tauri::command]
pub async fn set_outcome_status(
    state: State<'_, AppState>,
    status: String,
) -> Result<FormSnapshot, String> {
    Ok(state.dashboard.set_status(status).await)
}

#[tauri::command]
pub async fn set_outcome_comment(
    state: State<'_, AppState>,
    comment: String,
) -> Result<FormSnapshot, String> {
    Ok(state.dashboard.set_comment(comment).await)
}

#[tauri::command]
pub async fn set_outcome_audio(
    state: State<'_, AppState>,
    audio: Option<AudioFile>,
) -> Result<FormSnapshot, String> {
    Ok(state.dashboard.set_audio(audio).await)
}

#[tauri::command]
pub async fn get_outcome_form(state: State<'_, AppState>) -> Result<FormSnapshot, String> {
    Ok(state.dashboard.form_snapshot().await)
}

#[tauri::command]
pub async fn submit_outcome(state: State<'_, AppState>) -> Result<DashboardSnapshot, String> {
    let user = state
        .auth
        .current_user()
        .ok_or_else(|| "Not signed in".to_string())?;

    state
        .dashboard
        .submit_outcome(&user)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn list_call_statuses() -> Vec<&'static str> {
    ALL_STATUSES.iter().map(|s| s.as_str()).collect()
}

#[tauri::command]
pub fn audio_required_for_status(status: String) -> bool {
    outcome::is_audio_required(&status)
}
