use crate::sync_backend::SyncEvent;
use std::path::PathBuf;

/// Response messages from background operations
pub enum ResponseMessage {
    Event(SyncEvent),
    SyncFailed(String),
    DirectoryPicked(Option<PathBuf>), // None when the picker was cancelled
}
