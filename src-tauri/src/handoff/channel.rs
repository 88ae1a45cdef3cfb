use super::path::FileUrl;

/// One-way endpoint into the frontend. Held for the rest of the process once
/// the frontend is ready.
pub trait DeliveryChannel: Send + Sync {
    fn deliver(&self, file: &FileUrl);
}

pub trait FileSink {
    fn observe_file(&self, file: FileUrl);
}
