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

//! Per-button settings
//!
//! The host delivers settings as loose JSON objects. Only the three
//! recognised fields are ever read; anything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DOWN_FIELD: &str = "downFunction";
const UP_FIELD: &str = "upFunction";
const SOUND_FIELD: &str = "clickSound";

/// Settings owned by one dual-action button
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ButtonConfig {
    /// Action pressed on activation and released on deactivation
    #[serde(rename = "downFunction", default)]
    pub down_action_name: String,

    /// Action tapped on deactivation
    #[serde(rename = "upFunction", default)]
    pub up_action_name: String,

    /// Optional click sound played on activation
    #[serde(rename = "clickSound", default)]
    pub click_sound_path: Option<String>,
}

impl ButtonConfig {
    pub fn new(down: &str, up: &str) -> Self {
        Self {
            down_action_name: down.to_string(),
            up_action_name: up.to_string(),
            click_sound_path: None,
        }
    }

    /// Settings from the host's initial payload
    ///
    /// Returns the settings and whether they are fresh defaults, in which
    /// case the caller should write them back to the host.
    pub fn from_host(payload: &Value) -> (Self, bool) {
        let is_empty = match payload {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => true,
        };

        let mut config = Self::default();
        if !is_empty {
            config.merge_partial(payload);
        }
        (config, is_empty)
    }

    /// Copies the recognised fields present in `partial`
    ///
    /// String values replace the field. `null` empties the action names
    /// and removes the click sound. Values of any other type are skipped.
    /// Returns the number of fields updated.
    pub fn merge_partial(&mut self, partial: &Value) -> usize {
        let Some(map) = partial.as_object() else {
            return 0;
        };

        let mut merged = 0;

        for (field, slot) in [
            (DOWN_FIELD, &mut self.down_action_name),
            (UP_FIELD, &mut self.up_action_name),
        ] {
            match map.get(field) {
                Some(Value::String(value)) => {
                    *slot = value.clone();
                    merged += 1;
                }
                Some(Value::Null) => {
                    slot.clear();
                    merged += 1;
                }
                _ => {}
            }
        }

        match map.get(SOUND_FIELD) {
            Some(Value::String(value)) => {
                self.click_sound_path = Some(value.clone());
                merged += 1;
            }
            Some(Value::Null) => {
                self.click_sound_path = None;
                merged += 1;
            }
            _ => {}
        }

        merged
    }

    /// Wire form sent back to the host
    pub fn to_json(&self) -> Value {
        json!({
            "downFunction": self.down_action_name,
            "upFunction": self.up_action_name,
            "clickSound": self.click_sound_path,
        })
    }
}
