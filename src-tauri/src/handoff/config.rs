use std::time::Duration;

use log::warn;
use serde::Deserialize;

/// Environment variable that overrides `gracePeriodMs`.
pub const GRACE_PERIOD_ENV: &str = "INKWELL_GRACE_MS";

/// `plugins."file-handoff"` in `tauri.conf.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandoffConfig {
    pub grace_period_ms: u64,
    pub event_name: String,
    /// Treat the main window finishing its page load as readiness. Off by
    /// default: the page can finish loading before its listener is attached.
    pub ready_on_page_load: bool,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            grace_period_ms: 1500,
            event_name: "open-file".to_string(),
            ready_on_page_load: false,
        }
    }
}

impl HandoffConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    pub fn with_env_overrides(self) -> Self {
        let raw = std::env::var(GRACE_PERIOD_ENV).ok();
        self.with_grace_override(raw.as_deref())
    }

    fn with_grace_override(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.grace_period_ms = ms,
                Err(e) => warn!(
                    "Ignoring {}={:?}: {}; keeping {}ms",
                    GRACE_PERIOD_ENV, raw, e, self.grace_period_ms
                ),
            }
        }
        self
    }
}
