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

//! Synthesizers that never inject OS input

use std::{
    fmt,
    sync::{Mutex, PoisonError},
    thread,
    time::Duration,
};
use tracing::{debug, info, warn};

use crate::core::keystring::convert_key_string;
use crate::core::Binding;
use crate::input::{context::ForceStop, KeyEventSynthesizer};

/// One emitted input event
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SynthEvent {
    Down(Binding),
    Up(Binding),
    Tap { binding: Binding, hold_millis: u64 },
}

impl fmt::Display for SynthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthEvent::Down(binding) => write!(f, "down {}", binding),
            SynthEvent::Up(binding) => write!(f, "up {}", binding),
            SynthEvent::Tap {
                binding,
                hold_millis,
            } => write!(f, "tap {} ({} ms)", binding, hold_millis),
        }
    }
}

/// Records every event in emission order
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    events: Mutex<Vec<SynthEvent>>,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<SynthEvent> {
        self.lock().clone()
    }

    /// Removes and returns the recorded events
    pub fn take_events(&self) -> Vec<SynthEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn downs(&self) -> usize {
        self.count(|e| matches!(e, SynthEvent::Down(_)))
    }

    pub fn ups(&self) -> usize {
        self.count(|e| matches!(e, SynthEvent::Up(_)))
    }

    pub fn taps(&self) -> usize {
        self.count(|e| matches!(e, SynthEvent::Tap { .. }))
    }

    fn count(&self, predicate: impl Fn(&SynthEvent) -> bool) -> usize {
        self.lock().iter().filter(|e| predicate(e)).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SynthEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: SynthEvent) {
        self.lock().push(event);
    }
}

impl KeyEventSynthesizer for RecordingSynthesizer {
    fn press_down(&self, binding: &Binding) {
        self.push(SynthEvent::Down(binding.clone()));
    }

    fn release_up(&self, binding: &Binding) {
        self.push(SynthEvent::Up(binding.clone()));
    }

    fn tap(&self, binding: &Binding, hold_millis: u64) {
        self.push(SynthEvent::Tap {
            binding: binding.clone(),
            hold_millis,
        });
    }
}

/// Dry-run synthesizer: converts and logs instead of injecting
///
/// Events are dropped while the force-stop flag is set. Keyboard codes that
/// fail to convert are logged and skipped.
pub struct TracingSynthesizer {
    force_stop: ForceStop,
}

impl TracingSynthesizer {
    pub fn new(force_stop: ForceStop) -> Self {
        Self { force_stop }
    }

    fn emit(&self, phase: &str, binding: &Binding) -> bool {
        if self.force_stop.is_set() {
            debug!(phase, %binding, "force-stop set, event dropped");
            return false;
        }

        match binding {
            Binding::Keyboard(code) => match convert_key_string(code) {
                Ok(chord) => {
                    info!(phase, keys = %chord, "keyboard event");
                    true
                }
                Err(e) => {
                    warn!(phase, code = %code, error = %e, "unconvertible key string");
                    false
                }
            },
            other => {
                info!(phase, device = %other.device(), code = other.code(), "device event");
                true
            }
        }
    }
}

impl KeyEventSynthesizer for TracingSynthesizer {
    fn press_down(&self, binding: &Binding) {
        self.emit("down", binding);
    }

    fn release_up(&self, binding: &Binding) {
        self.emit("up", binding);
    }

    fn tap(&self, binding: &Binding, hold_millis: u64) {
        if self.emit("down", binding) {
            thread::sleep(Duration::from_millis(hold_millis));
            self.emit("up", binding);
        }
    }
}
