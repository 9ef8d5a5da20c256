use std::{
    sync::{Arc, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use super::{SettingsError, SettingsStore, file_watcher::FileWatcher};

const RELOAD_DEBOUNCE: Duration = Duration::from_millis(200);

/// A running watch on the settings file. Dropping it ends the watch.
pub(crate) struct SettingsWatch {
    _watcher: FileWatcher,
    task: JoinHandle<()>,
}

impl Drop for SettingsWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl SettingsStore {
    /// Starts watching the instance file for edits made by other processes.
    ///
    /// Bursts of file events are debounced into one [`reload`](Self::reload).
    /// The watch task only holds a weak reference, so it never keeps a
    /// dropped store alive. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// * `SettingsError::Disposed` - If the store was disposed
    /// * `SettingsError::FileWatcherInitError` / `SettingsError::FileWatchError` -
    ///   If the file system watch cannot be set up
    pub fn start_watching(self: &Arc<Self>) -> Result<(), SettingsError> {
        if self.is_disposed() {
            return Err(SettingsError::Disposed {
                instance_id: self.instance_id().to_string(),
            });
        }

        let mut slot = self.watch.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Ok(());
        }

        let (watcher, mut event_rx) = FileWatcher::new(self.file())?;
        let store = Arc::downgrade(self);

        let task = tokio::spawn(async move {
            let debounce = tokio::time::sleep(RELOAD_DEBOUNCE);
            tokio::pin!(debounce);
            let mut pending = false;

            loop {
                tokio::select! {
                    event = event_rx.recv() => {
                        let Some(event) = event else {
                            break;
                        };

                        trace!(path = %event.path.display(), kind = ?event.kind, "settings file event");
                        pending = true;
                        debounce
                            .as_mut()
                            .reset(tokio::time::Instant::now() + RELOAD_DEBOUNCE);
                    }

                    () = &mut debounce, if pending => {
                        pending = false;

                        let Some(store) = store.upgrade() else {
                            break;
                        };

                        let changed = store.reload();
                        if !changed.is_empty() {
                            info!(keys = ?changed, "applied external settings change");
                        }
                    }
                }
            }
        });

        info!(path = %self.file().display(), "watching settings file");
        *slot = Some(SettingsWatch {
            _watcher: watcher,
            task,
        });

        Ok(())
    }

    /// Ends the file watch if one is running.
    pub fn stop_watching(&self) {
        let watch = self
            .watch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if watch.is_some() {
            debug!(path = %self.file().display(), "stopped watching settings file");
        }
    }

    /// Whether a file watch is running.
    pub fn is_watching(&self) -> bool {
        self.watch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
