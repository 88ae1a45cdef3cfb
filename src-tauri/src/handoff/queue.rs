use std::collections::VecDeque;

use super::path::FileUrl;

/// Files observed before the frontend could take them, oldest first.
///
/// Append-only until [`PendingQueue::take`], which empties it in one go.
#[derive(Debug, Default)]
pub struct PendingQueue {
    files: VecDeque<FileUrl>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: FileUrl) {
        self.files.push_back(file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn take(&mut self) -> impl Iterator<Item = FileUrl> {
        std::mem::take(&mut self.files).into_iter()
    }
}
