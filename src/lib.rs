// Copyright 2025 bakri (tidynest@proton.me)
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

//! Dual-Action Keypad
//!
//! A hardware-button plugin core that maps one physical button to two
//! logical game actions: one held while the button is down, one tapped
//! when it is released.
//!
//! # Features
//!
//! - **Binding Resolution:** Action names resolve to the first bound
//!   device (keyboard, mouse, joystick, gamepad)
//! - **Dual-Action Simulation:** Press/hold the down action, release it
//!   and tap the up action on button release
//! - **Force-Stop:** Input is halted process-wide while no binding table
//!   is loaded
//! - **Action Index:** Grouped, sorted, searchable action list with key
//!   legends rendered for the active keyboard layout
//! - **Live Reload:** Binding table file watching with index refresh
//!
//! # Architecture
//!
//! - **`core`:** Business logic (types, catalogue, resolver, engine, index)
//! - **`input`:** Key event synthesis seam and shared input context
//! - **`config`:** Settings, binding table files, file watching
//! - **`audio`:** Click sound loading and playback seams
//! - **`plugin`:** Host-facing button lifecycle
//!
//! # Examples
//!
//! ## Resolving and simulating
//!
//! ```
//! use dual_action_keypad::config::ButtonConfig;
//! use dual_action_keypad::core::{
//!     Action, ActionCatalogue, BindingResolver, BindingTable, CatalogueStore, DualActionEngine,
//! };
//! use dual_action_keypad::input::{InputContext, RecordingSynthesizer};
//! use std::sync::Arc;
//!
//! let table: BindingTable = vec![
//!     Action::new("v_attack1").with_keyboard("{DikSpace}"),
//!     Action::new("v_reload").with_keyboard("{DikR}"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let catalogue: Arc<dyn ActionCatalogue> = Arc::new(CatalogueStore::with_table(table));
//! let synth = Arc::new(RecordingSynthesizer::new());
//! let engine = DualActionEngine::new(
//!     BindingResolver::new(catalogue),
//!     synth.clone(),
//!     InputContext::new(),
//! );
//!
//! let config = ButtonConfig::new("v_attack1", "v_reload");
//! engine.on_activate(&config);
//! engine.on_deactivate(&config);
//!
//! assert_eq!((synth.downs(), synth.ups(), synth.taps()), (1, 1, 1));
//! ```
//!
//! ## Building the action index
//!
//! ```no_run
//! use dual_action_keypad::config::load_catalogue_file;
//! use dual_action_keypad::core::{CatalogueIndexBuilder, LayoutKeyRenderer, Locale};
//! use std::sync::Arc;
//!
//! let table = load_catalogue_file("/tmp/actions.json")?;
//! let builder = CatalogueIndexBuilder::new(Arc::new(LayoutKeyRenderer::new()));
//!
//! for group in builder.build_for_locale(&table, &Locale::parse("de-DE")?) {
//!     println!("{}: {} actions", group.label, group.entries.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audio;
pub mod config;
pub mod core;
pub mod input;
pub mod plugin;

// Re-export commonly used types for convenience
pub use core::{Action, Binding, CatalogueStore, DualActionEngine, KeyState};
