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

//! src/core/engine.rs
//!
//! Dual-action press/release simulation
//!
//! A dual-action button has two independently configured logical actions:
//! - **down**: pressed on activation and held
//! - **up**: tapped on deactivation
//!
//! # Transitions
//!
//! - **Activate:** press the down binding.
//! - **Deactivate:** release the down binding, then tap the up binding
//!   unless the up action is the down action (same name) or unresolved.
//!
//! Releasing the down binding never depends on what the up action
//! resolves to, so a key pressed on activation is always let go.
//!
//! Both transitions resolve against the catalogue as it is at call time.
//! Deactivation does not remember what activation pressed: if the
//! catalogue reloads mid-press, the release targets the new binding.
//!
//! # Unavailable catalogue
//!
//! With no binding table loaded, both transitions set the shared
//! force-stop flag and emit nothing. Every other failure is a no-op.

use std::sync::Arc;
use tracing::debug;

use crate::config::ButtonConfig;
use crate::core::resolver::BindingResolver;
use crate::input::{InputContext, KeyEventSynthesizer};

/// Hold time of the up-action tap
pub const UP_TAP_HOLD_MS: u64 = 40;

/// Result of a transition, used by the host glue
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    /// Catalogue unavailable, force-stop raised, nothing emitted
    Halted,
    /// Transition ran (whether or not anything resolved)
    Completed,
}

/// Stateless dual-action state machine
///
/// Holds no per-press state; the two action names come from the caller's
/// `ButtonConfig` on every call.
#[derive(Clone)]
pub struct DualActionEngine {
    resolver: BindingResolver,
    synthesizer: Arc<dyn KeyEventSynthesizer>,
    context: InputContext,
}

impl DualActionEngine {
    pub fn new(
        resolver: BindingResolver,
        synthesizer: Arc<dyn KeyEventSynthesizer>,
        context: InputContext,
    ) -> Self {
        Self {
            resolver,
            synthesizer,
            context,
        }
    }

    /// Button pressed: hold the down action
    pub fn on_activate(&self, config: &ButtonConfig) -> Transition {
        if !self.enter() {
            return Transition::Halted;
        }

        if let Some(binding) = self.resolver.resolve(&config.down_action_name) {
            debug!(action = %config.down_action_name, %binding, "press down action");
            self.synthesizer.press_down(&binding);
        }

        Transition::Completed
    }

    /// Button released: let go of the down action, then tap the up action
    pub fn on_deactivate(&self, config: &ButtonConfig) -> Transition {
        if !self.enter() {
            return Transition::Halted;
        }

        if let Some(binding) = self.resolver.resolve(&config.down_action_name) {
            debug!(action = %config.down_action_name, %binding, "release down action");
            self.synthesizer.release_up(&binding);
        }

        // Same logical action: the release above already completed it
        if config.up_action_name == config.down_action_name {
            return Transition::Completed;
        }

        if let Some(binding) = self.resolver.resolve(&config.up_action_name) {
            debug!(action = %config.up_action_name, %binding, "tap up action");
            self.synthesizer.tap(&binding, UP_TAP_HOLD_MS);
        }

        Transition::Completed
    }

    /// Shared guard: force-stop mirrors catalogue availability
    fn enter(&self) -> bool {
        if !self.resolver.is_available() {
            self.context.force_stop.set();
            return false;
        }

        self.context.force_stop.clear();
        true
    }
}
