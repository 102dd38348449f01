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

//! Configuration and file management
//!
//! This module covers everything read from or written to disk:
//!
//! - **Button settings**: `ButtonConfig`, merged from partial host updates
//! - **Binding table files**: JSON arrays of actions loaded into a
//!   `BindingTable`
//! - **Atomic exports**: temp-file-then-rename writes of generated output
//! - **Live reload**: `CatalogueWatcher` reports binding file changes
//!
//! # Example
//!
//! ```no_run
//! use dual_action_keypad::config::load_catalogue_file;
//! use dual_action_keypad::core::CatalogueStore;
//!
//! let table = load_catalogue_file("~/.config/keypad/actions.json")?;
//! let store = CatalogueStore::with_table(table);
//! # Ok::<(), dual_action_keypad::config::ConfigError>(())
//! ```

pub mod error;
pub mod settings;
pub mod watcher;

pub use error::ConfigError;
pub use settings::ButtonConfig;
pub use watcher::CatalogueWatcher;

use atomic_write_file::AtomicWriteFile;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::core::{Action, BindingTable};

/// Expands `~` and `$VAR` in a user-supplied path
pub fn expand_path(raw: &str) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| ConfigError::InvalidPath(format!("{}: {}", raw, e)))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Loads a binding table from a JSON file
///
/// The file holds an array of actions. Later entries replace earlier ones
/// with the same name.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file doesn't exist and
/// `ConfigError::Json` if it isn't a valid action array.
pub fn load_catalogue_file(path: impl AsRef<Path>) -> Result<BindingTable, ConfigError> {
    let path = path.as_ref();
    let path = match path.to_str() {
        Some(raw) => expand_path(raw)?,
        None => return Err(ConfigError::InvalidPath(path.display().to_string())),
    };

    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }

    let content = fs::read_to_string(&path)?;
    let table = parse_catalogue(&content)?;

    info!(path = %path.display(), actions = table.len(), "binding table loaded");
    Ok(table)
}

/// Parses a binding table from its JSON text
pub fn parse_catalogue(content: &str) -> Result<BindingTable, ConfigError> {
    let actions: Vec<Action> = serde_json::from_str(content)?;
    Ok(actions.into_iter().collect())
}

/// Writes `content` to `path` atomically
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests;
