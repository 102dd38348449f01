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

//! Click sound loading and playback seams
//!
//! Decoding and output belong to the audio backend. This crate only reads
//! the file into a shared handle and passes it to an `AudioEngine`.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use thiserror::Error;

/// Sound loading and playback errors
#[derive(Debug, Error)]
pub enum SoundError {
    #[error("Sound file not found: {0}")]
    NotFound(PathBuf),

    #[error("Sound file is empty: {0}")]
    Empty(PathBuf),

    #[error("Cannot read sound file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Playback failed: {0}")]
    Playback(String),
}

/// A loaded sound, cheap to clone
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundHandle {
    pub path: PathBuf,
    pub data: Arc<[u8]>,
}

/// Loads sound resources
pub trait SoundCache: Send + Sync {
    fn load(&self, path: &Path) -> Result<SoundHandle, SoundError>;
}

/// Plays loaded sounds
pub trait AudioEngine: Send + Sync {
    fn play(&self, sound: &SoundHandle) -> Result<(), SoundError>;
}

/// Reads sound files from disk as raw bytes
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSoundCache;

impl SoundCache for FileSoundCache {
    fn load(&self, path: &Path) -> Result<SoundHandle, SoundError> {
        if !path.exists() {
            return Err(SoundError::NotFound(path.to_path_buf()));
        }

        let data = fs::read(path).map_err(|source| SoundError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if data.is_empty() {
            return Err(SoundError::Empty(path.to_path_buf()));
        }

        Ok(SoundHandle {
            path: path.to_path_buf(),
            data: data.into(),
        })
    }
}

/// Discards every sound
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudioEngine;

impl AudioEngine for SilentAudioEngine {
    fn play(&self, _sound: &SoundHandle) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Records the path of every played sound
#[derive(Debug, Default)]
pub struct RecordingAudioEngine {
    played: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl RecordingAudioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose every playback attempt fails
    pub fn failing() -> Self {
        Self {
            played: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn played(&self) -> Vec<PathBuf> {
        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AudioEngine for RecordingAudioEngine {
    fn play(&self, sound: &SoundHandle) -> Result<(), SoundError> {
        if self.fail {
            return Err(SoundError::Playback("output device unavailable".to_string()));
        }

        self.played
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sound.path.clone());
        Ok(())
    }
}
