use log::info;
use tauri::AppHandle;

use crate::host::control::signal_ready;

/// Called by the frontend once its `open-file` listener is registered.
#[tauri::command]
pub fn frontend_ready(app_handle: AppHandle) -> Result<(), String> {
    info!("Frontend reported ready");
    signal_ready(&app_handle)
}
