use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tauri::plugin::{Builder, TauriPlugin};
use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Emitter, Manager, Wry};

use crate::handoff::{
    launch_arguments, DeliveryChannel, FileHandoff, FileUrl, HandoffConfig, OsEventNormalizer,
    Scheduler, Task,
};

/// Label of the window whose page load counts as the frontend starting up.
pub const MAIN_WINDOW: &str = "main";

pub type AppHandoff = FileHandoff<EventChannel, DelayedScheduler>;

// Helper function to emit events to ALL windows
pub fn emit_event<S: Clone + serde::Serialize>(
    event_name: &str,
    payload: S,
    app_handle: &AppHandle,
) {
    if let Err(e) = app_handle.emit(event_name, payload) {
        warn!(
            "Failed to emit event '{}' to all windows: {}",
            event_name, e
        );
    }
}

/// Delivers files to the webview as a Tauri event.
pub struct EventChannel {
    app_handle: AppHandle,
    event_name: String,
}

impl EventChannel {
    pub fn new(app_handle: AppHandle, event_name: impl Into<String>) -> Self {
        Self {
            app_handle,
            event_name: event_name.into(),
        }
    }
}

impl DeliveryChannel for EventChannel {
    fn deliver(&self, file: &FileUrl) {
        info!("Sending file to frontend: {}", file);
        emit_event(&self.event_name, file.clone(), &self.app_handle);
    }
}

/// Sleeps on the async runtime, then hands the task to `post`.
///
/// The app posts to the main thread so the drain runs on the same event loop
/// that reports opened files.
pub struct DelayedScheduler {
    post: Arc<dyn Fn(Task) + Send + Sync>,
}

impl DelayedScheduler {
    pub fn new(post: impl Fn(Task) + Send + Sync + 'static) -> Self {
        Self {
            post: Arc::new(post),
        }
    }

    pub fn on_main_thread(app_handle: AppHandle) -> Self {
        Self::new(move |task| {
            if let Err(e) = app_handle.run_on_main_thread(task) {
                error!("Failed to post pending-file drain to main thread: {}", e);
            }
        })
    }
}

impl Scheduler for DelayedScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let post = Arc::clone(&self.post);
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(delay).await;
            post(task);
        });
    }
}

/// Hands the frontend's channel to the gate. Safe to call more than once.
pub fn signal_ready(app_handle: &AppHandle) -> Result<(), String> {
    let handoff = app_handle
        .try_state::<AppHandoff>()
        .ok_or_else(|| "File handoff is not initialized".to_string())?;
    let config = app_handle
        .try_state::<HandoffConfig>()
        .ok_or_else(|| "File handoff config is not initialized".to_string())?;
    handoff.mark_ready(EventChannel::new(
        app_handle.clone(),
        config.event_name.clone(),
    ));
    Ok(())
}

fn normalize_into_handoff(
    app_handle: &AppHandle,
    submit: impl FnOnce(&OsEventNormalizer<'_, AppHandoff>) -> usize,
) {
    match app_handle.try_state::<AppHandoff>() {
        Some(handoff) => {
            let forwarded = submit(&OsEventNormalizer::new(&*handoff));
            info!("Forwarded {} opened file(s)", forwarded);
        }
        None => error!("Opened files arrived before the file handoff was set up"),
    }
}

pub fn init() -> TauriPlugin<Wry, Option<HandoffConfig>> {
    Builder::<Wry, Option<HandoffConfig>>::new("file-handoff")
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default().with_env_overrides();
            info!(
                "File handoff: grace period {:?}, event '{}'",
                config.grace_period(),
                config.event_name
            );
            let handoff: AppHandoff = FileHandoff::new(
                DelayedScheduler::on_main_thread(app.clone()),
                config.grace_period(),
            );
            app.manage(handoff);
            app.manage(config);

            let launch_paths = launch_arguments(std::env::args());
            if !launch_paths.is_empty() {
                info!("Launch arguments: {:?}", launch_paths);
                normalize_into_handoff(app, |normalizer| {
                    normalizer.open_files(&launch_paths)
                });
            }
            Ok(())
        })
        .on_page_load(|webview, payload| {
            if !matches!(payload.event(), PageLoadEvent::Finished)
                || webview.label() != MAIN_WINDOW
            {
                return;
            }
            let app_handle = webview.app_handle();
            let on_page_load = app_handle
                .try_state::<HandoffConfig>()
                .map(|config| config.ready_on_page_load)
                .unwrap_or(false);
            if on_page_load {
                info!("Main window finished loading");
                if let Err(e) = signal_ready(app_handle) {
                    error!("{}", e);
                }
            }
        })
        .on_event(|app, event| {
            #[cfg(any(target_os = "macos", target_os = "ios"))]
            if let tauri::RunEvent::Opened { urls } = event {
                info!("Opened called with {} url(s)", urls.len());
                normalize_into_handoff(app, |normalizer| normalizer.open_urls(urls));
            }

            #[cfg(not(any(target_os = "macos", target_os = "ios")))]
            let _ = (app, event);
        })
        .build()
}
