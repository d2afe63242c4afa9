//! DLL sync operation
//!
//! Walks the DLLs sitting in a target directory and refreshes each one from the
//! same-named file in a source directory. Work happens lazily: every call to
//! `next()` copies at most one file, so a caller can show progress as it goes.

use crate::constant::DLL_EXTENSION;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to resolve working directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("source and destination are the same file")]
    SameFile,

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// One step of a sync run, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Updated(String),
    Failed { name: String, reason: String },
    /// Terminal: at least one file was updated
    Summary(usize),
    /// Terminal: nothing was updated
    NothingUpdated,
}

impl SyncEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncEvent::Summary(_) | SyncEvent::NothingUpdated)
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::Updated(name) => write!(f, "Updated {}.", name),
            SyncEvent::Failed { name, reason } => {
                write!(f, "Failed to update {}: {}", name, reason)
            }
            SyncEvent::Summary(count) => write!(f, "Updated {} DLL(s)!", count),
            SyncEvent::NothingUpdated => write!(f, "No DLLs available for update."),
        }
    }
}

/// Whether `name` looks like a DLL, judged by extension only
pub fn is_dll_name(name: &str) -> bool {
    name.to_lowercase().ends_with(DLL_EXTENSION)
}

/// Start refreshing the DLLs in `target_dir` from `source_dir`.
///
/// Only enumerating `target_dir` can fail here. A missing `source_dir` is not an
/// error: every candidate is simply skipped.
pub fn sync(
    source_dir: impl AsRef<Path>,
    target_dir: impl AsRef<Path>,
) -> Result<DllSync, SyncError> {
    let source_dir = source_dir.as_ref().to_path_buf();
    let target_dir = target_dir.as_ref().to_path_buf();

    let entries = fs::read_dir(&target_dir).map_err(|source| SyncError::ReadDir {
        path: target_dir.clone(),
        source,
    })?;

    info!("Syncing DLLs from {:?} into {:?}", source_dir, target_dir);

    Ok(DllSync {
        source_dir,
        target_dir,
        entries: Some(entries),
        updated: 0,
    })
}

/// Same as [`sync`] with the process working directory as the target
pub fn sync_current_dir(source_dir: impl AsRef<Path>) -> Result<DllSync, SyncError> {
    let target_dir = std::env::current_dir().map_err(SyncError::CurrentDir)?;
    sync(source_dir, target_dir)
}

pub struct DllSync {
    source_dir: PathBuf,
    target_dir: PathBuf,
    // None once the terminal event has been handed out
    entries: Option<fs::ReadDir>,
    updated: usize,
}

impl DllSync {
    /// Refresh a single directory entry, if it is a candidate with a source counterpart
    fn update_entry(&mut self, file_name: &OsStr) -> Option<SyncEvent> {
        let name = file_name.to_string_lossy().into_owned();
        if !is_dll_name(&name) {
            return None;
        }

        let source = self.source_dir.join(file_name);
        if !source.is_file() {
            debug!("Skipping {}: no counterpart in {:?}", name, self.source_dir);
            return None;
        }

        let target = self.target_dir.join(file_name);
        match copy_file(&source, &target) {
            Ok(()) => {
                self.updated += 1;
                info!("Updated {}", name);
                Some(SyncEvent::Updated(name))
            }
            Err(e) => {
                warn!("Failed to update {}: {}", name, e);
                Some(SyncEvent::Failed {
                    name,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn finish(&self) -> SyncEvent {
        info!("Sync finished, {} file(s) updated", self.updated);
        if self.updated == 0 {
            SyncEvent::NothingUpdated
        } else {
            SyncEvent::Summary(self.updated)
        }
    }
}

impl Iterator for DllSync {
    type Item = SyncEvent;

    fn next(&mut self) -> Option<SyncEvent> {
        loop {
            let entry = match self.entries.as_mut()?.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    warn!("Skipping unreadable entry in {:?}: {}", self.target_dir, e);
                    continue;
                }
                None => {
                    self.entries = None;
                    return Some(self.finish());
                }
            };

            if let Some(event) = self.update_entry(&entry.file_name()) {
                return Some(event);
            }
        }
    }
}

impl FusedIterator for DllSync {}

/// Overwrite `target` with `source`, then carry over the modification time.
fn copy_file(source: &Path, target: &Path) -> Result<(), SyncError> {
    // Copying a file onto itself would truncate it
    if let (Ok(a), Ok(b)) = (source.canonicalize(), target.canonicalize())
        && a == b
    {
        return Err(SyncError::SameFile);
    }

    fs::copy(source, target)?;

    if let Err(e) = copy_modified_time(source, target) {
        warn!("Copied {:?} but could not keep its modification time: {}", target, e);
    }

    Ok(())
}

fn copy_modified_time(source: &Path, target: &Path) -> io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    open_for_set_times(target)?.set_modified(modified)
}

/// Open a handle that may change file times without needing write access,
/// since the copied file inherits the source's (possibly read-only) permissions.
fn open_for_set_times(path: &Path) -> io::Result<fs::File> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;
        fs::OpenOptions::new()
            .access_mode(FILE_WRITE_ATTRIBUTES)
            .open(path)
    }
    #[cfg(not(windows))]
    {
        // futimens only needs ownership, not a writable descriptor
        fs::File::open(path)
    }
}
