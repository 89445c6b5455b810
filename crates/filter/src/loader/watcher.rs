//! Background watcher that reloads the filter document on change.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info};

use super::error::{FilterError, Result};

/// How long one poll waits for filesystem events before rechecking the stop flag.
pub const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Watches one file and runs a callback whenever it is created or modified.
///
/// The parent directory is watched non-recursively and events for other
/// files are ignored. The callback runs on the watcher thread and the loop
/// waits for it, so reloads never overlap. Dropping the watcher stops it.
pub struct ConfigWatcher {
    path: PathBuf,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ConfigWatcher {
    /// Register the watch and spawn the polling thread.
    ///
    /// Fails when the file has no name or its directory cannot be watched.
    pub fn start<F>(path: impl Into<PathBuf>, on_change: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let path = path.into();
        let file_name = path.file_name().map(OsStr::to_os_string).ok_or_else(|| {
            FilterError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            ))
        })?;
        let dir = watch_dir(&path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let stop = Arc::new(AtomicBool::new(false));
        let handle = thread::Builder::new()
            .name("log-filter-watcher".to_string())
            .spawn({
                let stop = Arc::clone(&stop);
                move || poll_loop(watcher, rx, file_name, stop, on_change)
            })?;

        info!(path = %path.display(), "watching config file for changes");
        Ok(Self {
            path,
            stop,
            handle: Some(handle),
        })
    }

    /// The watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True while the polling loop is alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the loop to exit and wait for it.
    ///
    /// The flag is observed within one [`POLL_INTERVAL`], or after the
    /// callback returns if a reload is in progress.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!(path = %self.path.display(), "config watcher thread panicked");
            }
            info!(path = %self.path.display(), "stopped watching config file");
        }
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Directory to register: the file's parent, or `.` for a bare file name.
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn poll_loop<F: FnMut()>(
    watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    file_name: OsString,
    stop: Arc<AtomicBool>,
    mut on_change: F,
) {
    // Held for the lifetime of the loop; dropping it releases the watch.
    let _watcher = watcher;

    while !stop.load(Ordering::Acquire) {
        let first = match rx.recv_timeout(POLL_INTERVAL) {
            Ok(res) => res,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                error!("config watcher channel disconnected, stopping");
                break;
            }
        };

        // Coalesce everything already queued into at most one reload.
        let mut changed = false;
        let mut failure = None;
        for res in std::iter::once(first).chain(rx.try_iter()) {
            match res {
                Ok(event) => changed |= is_relevant(&event, &file_name),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if changed {
            on_change();
        }
        if let Some(e) = failure {
            error!(error = %e, "config watcher failed, stopping");
            break;
        }
    }

    debug!("config watcher loop exited");
}

/// A create/modify event naming the watched file, excluding overflow
/// (rescan) notifications and the old name of a rename.
fn is_relevant(event: &Event, file_name: &OsStr) -> bool {
    if event.need_rescan() {
        return false;
    }
    let kind_matches = match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => false,
        EventKind::Create(_) | EventKind::Modify(_) => true,
        _ => false,
    };
    kind_matches && event.paths.iter().any(|p| p.file_name() == Some(file_name))
}
