pub mod handoff;
mod host;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let mut builder = tauri::Builder::default();
    // Installed ahead of the handoff plugin so its setup logs are kept.
    if cfg!(debug_assertions) {
        builder = builder.plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .build(),
        );
    }
    builder
        .plugin(host::control::init())
        .invoke_handler(tauri::generate_handler![host::cmd::frontend_ready])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
