use tauri::State;

use crate::{auth::User, AppState};

#[tauri::command]
pub fn login(state: State<'_, AppState>, username: String, password: String) -> Result<User, String> {
    state
        .auth
        .login(&username, &password)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn logout(state: State<'_, AppState>) -> Result<(), String> {
    state.auth.logout().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn current_user(state: State<'_, AppState>) -> Result<Option<User>, String> {
    Ok(state.auth.current_user())
}
