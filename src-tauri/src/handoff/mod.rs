//! Hand-off of OS file-open events to the frontend.
//!
//! Files can be opened (double-click, drag onto the dock icon, launch
//! arguments) before the webview is able to listen for them. Everything the OS
//! reports goes through a [`ReadinessGate`]: queued while the frontend is
//! starting, drained once in order after it signals readiness, and delivered
//! straight through afterwards. Nothing here depends on Tauri.

mod channel;
mod config;
mod drain;
mod gate;
mod normalizer;
mod path;
mod queue;

pub use channel::{DeliveryChannel, FileSink};
pub use config::{HandoffConfig, GRACE_PERIOD_ENV};
pub use drain::{FileHandoff, Scheduler, Task};
pub use gate::{Arming, Readiness, ReadinessGate};
pub use normalizer::{launch_arguments, OsEventNormalizer};
pub use path::FileUrl;
pub use queue::PendingQueue;
