//! Stylesheet source watcher with debouncing.
//!
//! Watches the source root recursively and forwards changes to stylesheet
//! files only, skipping hidden paths and `node_modules`.

use crate::error::{CliError, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Extensions whose changes trigger a stylesheet rebuild.
pub const STYLE_EXTENSIONS: [&str; 2] = ["less", "css"];

#[derive(Debug, Clone)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Recursive watcher feeding a channel.
///
/// Repeated events for the same file inside the debounce window collapse
/// into one.
pub struct StyleWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl StyleWatcher {
    /// Start watching `root`.
    ///
    /// # Errors
    ///
    /// [`CliError::FileNotFound`] when `root` does not exist, or the
    /// underlying watcher error.
    pub fn new(root: PathBuf, debounce_ms: u64) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);

        let debounce = Duration::from_millis(debounce_ms);
        let mut last_event: Option<(PathBuf, Instant)> = None;
        let watched_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };
            for path in &event.paths {
                if !Self::is_relevant(path, &watched_root) {
                    continue;
                }

                let now = Instant::now();
                if let Some((last_path, last_time)) = &last_event {
                    if last_path == path && now.duration_since(*last_time) < debounce {
                        continue;
                    }
                }
                last_event = Some((path.clone(), now));

                let change = match event.kind {
                    notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                    notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                    notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                    _ => continue,
                };

                let _ = tx.blocking_send(change);
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// A stylesheet inside `root`, outside hidden directories and
    /// `node_modules`.
    fn is_relevant(path: &Path, root: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };

        let excluded = relative.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            name == "node_modules" || (name.starts_with('.') && name != "." && name != "..")
        });
        if excluded {
            return false;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| STYLE_EXTENSIONS.contains(&ext))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Next change from an optional watcher; pending forever without one.
pub async fn next_change(rx: Option<&mut mpsc::Receiver<FileChange>>) -> Option<FileChange> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
