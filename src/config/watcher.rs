// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! File system watcher for live binding table reloads
//!
//! Uses OS-level file watching (Linux inotify) via the notify crate.
//! Zero CPU overhead when the file is unchanged.
//!
//! The parent directory is watched and events are filtered on the file
//! name, so saves that rename a temp file over the table are reported the
//! same as in-place writes.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::mpsc::{channel, Receiver},
};

use crate::config::ConfigError;

/// Watches a binding table file for modifications
pub struct CatalogueWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    path: PathBuf,
    file_name: OsString,
}

impl CatalogueWatcher {
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let watch_failed = |message: String| ConfigError::WatchFailed {
            path: path.to_path_buf(),
            message,
        };

        if !path.is_file() {
            return Err(watch_failed("not an existing file".to_string()));
        }

        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| watch_failed("path has no file name".to_string()))?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(|e| watch_failed(e.to_string()))?;

        watcher
            .watch(directory, RecursiveMode::NonRecursive)
            .map_err(|e| watch_failed(e.to_string()))?;

        Ok(CatalogueWatcher {
            _watcher: watcher,
            rx,
            path: path.to_path_buf(),
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks for modification events on the watched file (non-blocking)
    pub fn check_for_changes(&self) -> bool {
        let mut changed = false;
        while let Ok(event_result) = self.rx.try_recv() {
            if let Ok(event) = event_result {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                    && self.concerns_file(&event)
                {
                    changed = true;
                }
            }
        }
        changed
    }

    fn concerns_file(&self, event: &Event) -> bool {
        event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.file_name.as_os_str()))
    }
}
