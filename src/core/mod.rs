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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms
//! of the dual-action button, including:
//! - Type definitions for actions, bindings and the derived picker index
//! - The reloadable action catalogue and its reload notifications
//! - Binding resolution and the dual-action press/release engine
//! - Key-string parsing, keyboard-layout locales and the index builder
//!
//! All business logic is isolated from the host and from OS input so it
//! can be unit tested without either.

pub mod catalogue;
pub mod engine;
pub mod index;
pub mod keystring;
pub mod locale;
pub mod reload;
pub mod render;
pub mod resolver;
pub mod types;

pub use catalogue::{ActionCatalogue, BindingTable, CatalogueStore};
pub use engine::{DualActionEngine, Transition, UP_TAP_HOLD_MS};
pub use index::{CatalogueIndexBuilder, IndexError, IndexPayload};
pub use locale::{EnvLayoutSource, FixedLayoutSource, KeyboardLayoutSource, Locale};
pub use render::{LayoutKeyRenderer, LocaleKeyRenderer};
pub use resolver::BindingResolver;
pub use types::*;

#[cfg(test)]
mod tests;
