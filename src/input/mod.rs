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

//! Simulated input emission
//!
//! # Synthesizers
//!
//! This module ships two synthesizers, neither of which touches the OS:
//! - **DryRun** (`TracingSynthesizer`): converts and logs every event
//! - **Record** (`RecordingSynthesizer`): keeps every event for inspection
//!
//! OS injection backends implement `KeyEventSynthesizer` outside this
//! crate. All calls are fire-and-forget: a backend swallows its own
//! failures and never reports back to the engine.
//!
//! # Example
//! ```
//! use dual_action_keypad::input::{KeyEventSynthesizer, RecordingSynthesizer, SynthEvent};
//! use dual_action_keypad::core::Binding;
//!
//! let synth = RecordingSynthesizer::new();
//! let fire = Binding::Keyboard("{DikSpace}".to_string());
//!
//! synth.press_down(&fire);
//! synth.release_up(&fire);
//!
//! assert_eq!(synth.events(), vec![SynthEvent::Down(fire.clone()), SynthEvent::Up(fire)]);
//! ```

pub mod context;
pub mod recording;

pub use context::{ForceStop, InputContext};
pub use recording::{RecordingSynthesizer, SynthEvent, TracingSynthesizer};

use crate::core::Binding;

/// Emits low-level input for a binding
pub trait KeyEventSynthesizer: Send + Sync {
    /// Press and keep holding
    fn press_down(&self, binding: &Binding);

    /// Release a previously pressed binding
    fn release_up(&self, binding: &Binding);

    /// Press, hold for `hold_millis`, release
    fn tap(&self, binding: &Binding, hold_millis: u64);
}
