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

//! Outbound messages to the hardware-button host

use serde_json::Value;
use std::sync::{Mutex, PoisonError};

use crate::core::KeyState;

/// Messages a button sends to its host
///
/// Delivery is fire-and-forget; the transport owns its own failures.
pub trait HostConnection: Send + Sync {
    /// Switch the button's visual state
    fn set_state(&self, state: KeyState);

    /// Push a payload to the configuration UI
    fn send_to_property_inspector(&self, payload: Value);

    /// Persist settings on the host side
    fn set_settings(&self, settings: Value);
}

/// One recorded host message
#[derive(Clone, Debug, PartialEq)]
pub enum HostMessage {
    State(KeyState),
    PropertyInspector(Value),
    Settings(Value),
}

/// Host double that records every message
#[derive(Debug, Default)]
pub struct RecordingHost {
    messages: Mutex<Vec<HostMessage>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<HostMessage> {
        self.lock().clone()
    }

    /// Visual states in the order they were reported
    pub fn states(&self) -> Vec<KeyState> {
        self.lock()
            .iter()
            .filter_map(|m| match m {
                HostMessage::State(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Payloads pushed to the property inspector
    pub fn inspector_payloads(&self) -> Vec<Value> {
        self.lock()
            .iter()
            .filter_map(|m| match m {
                HostMessage::PropertyInspector(payload) => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HostMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostConnection for RecordingHost {
    fn set_state(&self, state: KeyState) {
        self.lock().push(HostMessage::State(state));
    }

    fn send_to_property_inspector(&self, payload: Value) {
        self.lock().push(HostMessage::PropertyInspector(payload));
    }

    fn set_settings(&self, settings: Value) {
        self.lock().push(HostMessage::Settings(settings));
    }
}
