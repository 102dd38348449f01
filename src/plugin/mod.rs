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

//! Host-facing lifecycle glue
//!
//! - **`button`:** the dual-action button and its shared services
//! - **`host`:** the outbound host interface and a recording double
//!
//! # Example
//! ```
//! use dual_action_keypad::core::{Action, BindingTable, CatalogueStore, KeyState};
//! use dual_action_keypad::input::{InputContext, RecordingSynthesizer};
//! use dual_action_keypad::plugin::{ButtonServices, DualActionButton, RecordingHost};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let table: BindingTable = vec![
//!     Action::new("v_attack1").with_label("Fire").with_keyboard("{DikSpace}"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let store = Arc::new(CatalogueStore::with_table(table));
//! let synth = Arc::new(RecordingSynthesizer::new());
//! let host = Arc::new(RecordingHost::new());
//! let services = ButtonServices::new(store, synth.clone()).with_context(InputContext::new());
//!
//! let button = DualActionButton::new(
//!     host.clone(),
//!     &json!({ "downFunction": "v_attack1", "upFunction": "v_attack1" }),
//!     services,
//! );
//!
//! button.key_pressed();
//! button.key_released();
//!
//! assert_eq!(host.states(), vec![KeyState::Pressed, KeyState::Released]);
//! assert_eq!((synth.downs(), synth.ups(), synth.taps()), (1, 1, 0));
//! ```

pub mod button;
pub mod host;

pub use button::{ButtonServices, DualActionButton, PROPERTY_INSPECTOR_CONNECTED};
pub use host::{HostConnection, HostMessage, RecordingHost};

#[cfg(test)]
mod tests;
