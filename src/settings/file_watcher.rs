use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, recommended_watcher};
use tokio::sync::mpsc;

use super::SettingsError;

/// Represents a file system event for the watched settings file.
#[derive(Debug, Clone)]
pub struct FileEvent {
    /// The path of the file that changed
    pub path: PathBuf,
    /// The type of change that occurred
    pub kind: FileEventKind,
}

/// The type of file system change that occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum FileEventKind {
    /// File was modified
    Modified,
    /// File was created, including by rename over the old file
    Created,
    /// File was removed
    Removed,
}

/// Watches a single file for changes.
///
/// The parent directory is watched rather than the file itself: editors that
/// save by writing a temporary file and renaming it over the original replace
/// the inode, which would silently end a watch on the file.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl FileWatcher {
    /// Starts watching `path` and returns the watcher and its event receiver.
    ///
    /// Uses an unbounded channel since file events are typically infrequent but bursty.
    ///
    /// # Errors
    /// Returns error if the path has no parent directory or the underlying
    /// file system watcher cannot be initialized.
    pub fn new(path: &Path) -> Result<(Self, mpsc::UnboundedReceiver<FileEvent>), SettingsError> {
        let (parent, file_name) = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => (parent.to_path_buf(), name.to_os_string()),
            _ => {
                return Err(SettingsError::FileWatchError {
                    path: path.to_path_buf(),
                    details: "settings path has no parent directory".to_string(),
                });
            }
        };

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut watcher = recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };
            forward_event(&event, &file_name, &event_tx);
        })
        .map_err(|e| SettingsError::FileWatcherInitError {
            details: e.to_string(),
        })?;

        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .map_err(|e| SettingsError::FileWatchError {
                path: parent.clone(),
                details: e.to_string(),
            })?;

        Ok((
            Self {
                _watcher: watcher,
                path: path.to_path_buf(),
            },
            event_rx,
        ))
    }

    /// The file being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn forward_event(
    event: &Event,
    file_name: &OsString,
    event_tx: &mpsc::UnboundedSender<FileEvent>,
) {
    let kind = match event.kind {
        EventKind::Create(_) => FileEventKind::Created,
        EventKind::Modify(_) => FileEventKind::Modified,
        EventKind::Remove(_) => FileEventKind::Removed,
        _ => return,
    };

    for path in &event.paths {
        if path.file_name() != Some(file_name.as_os_str()) {
            continue;
        }

        let _ = event_tx.send(FileEvent {
            path: path.clone(),
            kind: kind.clone(),
        });
    }
}
