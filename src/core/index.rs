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

//! src/core/index.rs
//!
//! Action picker index
//!
//! Projects the catalogue into the grouped, sorted, searchable list shown
//! by the property inspector. The projection is a pure function of the
//! catalogue snapshot and the locale; nothing is cached between builds.
//!
//! # Algorithm
//! 1. Keep actions bound on at least one device
//! 2. Group by group label (ascending)
//! 3. Order each group by category, then label (ascending, ordinal)
//! 4. Render the primary binding (keyboard through the layout renderer)
//! 5. Compose display text and search text
//! 6. Skip empty groups
//!
//! A failure part-way through is logged and the groups completed so far
//! are returned; the build never fails as a whole.

use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use tracing::{error, info};

use crate::core::catalogue::ActionCatalogue;
use crate::core::keystring::{KeyStringError, KEY_MARKER};
use crate::core::locale::{KeyboardLayoutSource, Locale};
use crate::core::render::LocaleKeyRenderer;
use crate::core::types::{Action, Binding, CatalogueEntry, CatalogueGroup};

/// Faults raised while building the index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Invalid locale identifier '{0}'")]
    InvalidLocale(String),

    #[error("Cannot render key binding '{code}' for {locale}: {source}")]
    Render {
        code: String,
        locale: String,
        #[source]
        source: KeyStringError,
    },
}

/// Payload pushed to the property inspector after a rebuild
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPayload {
    pub functions_loaded: bool,
    pub functions: Vec<CatalogueGroup>,
}

impl IndexPayload {
    pub fn loaded(functions: Vec<CatalogueGroup>) -> Self {
        Self {
            functions_loaded: true,
            functions,
        }
    }

    /// Wire form pushed to the property inspector
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Collapse rendered key-string markup into a `+`-joined combo
///
/// `{DikLControl}{DikA}` → `LControl+A`
pub fn format_key_combo(rendered: &str) -> String {
    rendered
        .replace(KEY_MARKER, "")
        .replace("}{", "+")
        .replace(['{', '}'], "")
}

/// Builds the picker index from a catalogue
#[derive(Clone)]
pub struct CatalogueIndexBuilder {
    renderer: Arc<dyn LocaleKeyRenderer>,
}

impl CatalogueIndexBuilder {
    pub fn new(renderer: Arc<dyn LocaleKeyRenderer>) -> Self {
        Self { renderer }
    }

    /// Builds the index for the active keyboard layout
    pub fn build(
        &self,
        catalogue: &dyn ActionCatalogue,
        layouts: &dyn KeyboardLayoutSource,
    ) -> Vec<CatalogueGroup> {
        let locale = Locale::from_layout(layouts);
        self.build_for_locale(catalogue, &locale)
    }

    /// Builds the index for an explicit locale
    pub fn build_for_locale(
        &self,
        catalogue: &dyn ActionCatalogue,
        locale: &Locale,
    ) -> Vec<CatalogueGroup> {
        let mut groups = Vec::new();

        match self.collect_groups(catalogue, locale, &mut groups) {
            Ok(()) => {
                info!(
                    locale = %locale,
                    groups = groups.len(),
                    "action index built"
                );
            }
            Err(e) => {
                error!(
                    locale = %locale,
                    groups = groups.len(),
                    error = ?e,
                    "action index build failed, returning partial result: {}",
                    e
                );
            }
        }

        groups
    }

    fn collect_groups(
        &self,
        catalogue: &dyn ActionCatalogue,
        locale: &Locale,
        groups: &mut Vec<CatalogueGroup>,
    ) -> Result<(), IndexError> {
        let mut by_group: BTreeMap<String, Vec<Action>> = BTreeMap::new();
        for action in catalogue.all_actions().into_iter().filter(Action::has_binding) {
            by_group
                .entry(action.group_label.clone())
                .or_default()
                .push(action);
        }

        for (label, mut actions) in by_group {
            actions.sort_by(|a, b| {
                a.display_category
                    .cmp(&b.display_category)
                    .then_with(|| a.display_label.cmp(&b.display_label))
            });

            let mut entries = Vec::with_capacity(actions.len());
            for action in &actions {
                entries.push(self.entry_for(action, locale)?);
            }

            if !entries.is_empty() {
                groups.push(CatalogueGroup { label, entries });
            }
        }

        Ok(())
    }

    fn entry_for(&self, action: &Action, locale: &Locale) -> Result<CatalogueEntry, IndexError> {
        let binding = self.primary_binding_text(action, locale)?;

        let text = if binding.trim().is_empty() {
            action.display_label.clone()
        } else {
            format!("{} [{}]", action.display_label, binding)
        };

        let search_text = format!(
            "{} {} {}",
            action.display_label.to_lowercase(),
            action.description.as_deref().unwrap_or_default().to_lowercase(),
            binding.to_lowercase()
        );

        Ok(CatalogueEntry {
            value: action.name.clone(),
            text,
            search_text,
        })
    }

    /// Display text of the primary binding, empty if unbound
    pub fn primary_binding_text(
        &self,
        action: &Action,
        locale: &Locale,
    ) -> Result<String, IndexError> {
        match action.primary_binding() {
            Some(Binding::Keyboard(code)) => {
                let rendered = self.renderer.render(&code, locale.name())?;
                Ok(format_key_combo(&rendered))
            }
            Some(other) => Ok(other.code().to_string()),
            None => Ok(String::new()),
        }
    }
}
