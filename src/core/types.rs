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

//! src/core/types.rs
//!
//! Core type definitions for action and binding management
//!
//! This module defines the fundamental types used throughout the crate:
//! - `DeviceKind`: The physical device family a binding belongs to
//! - `Binding`: A physical input mapped to a logical action
//! - `Action`: A catalogued logical action with its optional bindings
//! - `KeyState`: The two visual states reported to the host
//! - `CatalogueEntry` / `CatalogueGroup`: The derived picker projection
//!
//! The catalogue types deserialise from the binding table's JSON form and
//! the derived types serialise to the property inspector's wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical device family of a binding
///
/// The declaration order is also the primary-binding priority: keyboard
/// wins over mouse, mouse over joystick, joystick over gamepad.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Keyboard key or key combination (key-string markup)
    Keyboard,
    /// Mouse button or axis
    Mouse,
    /// Joystick button, hat or axis
    Joystick,
    /// Gamepad button or axis
    Gamepad,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Keyboard => write!(f, "keyboard"),
            DeviceKind::Mouse => write!(f, "mouse"),
            DeviceKind::Joystick => write!(f, "joystick"),
            DeviceKind::Gamepad => write!(f, "gamepad"),
        }
    }
}

/// A physical input mapped to a logical action
///
/// Keyboard codes are key-string markup such as `{DikLControl}{DikA}`;
/// the other devices carry the binding identifier verbatim (`mouse1`,
/// `js1_button3`, `gp1_a`).
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "device", content = "code", rename_all = "lowercase")]
pub enum Binding {
    Keyboard(String),
    Mouse(String),
    Joystick(String),
    Gamepad(String),
}

impl Binding {
    /// Device family of this binding
    pub fn device(&self) -> DeviceKind {
        match self {
            Binding::Keyboard(_) => DeviceKind::Keyboard,
            Binding::Mouse(_) => DeviceKind::Mouse,
            Binding::Joystick(_) => DeviceKind::Joystick,
            Binding::Gamepad(_) => DeviceKind::Gamepad,
        }
    }

    /// Raw binding code, exactly as stored in the catalogue
    pub fn code(&self) -> &str {
        match self {
            Binding::Keyboard(code)
            | Binding::Mouse(code)
            | Binding::Joystick(code)
            | Binding::Gamepad(code) => code,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.device(), self.code())
    }
}

/// A catalogued logical action
///
/// Field names on the wire follow the game's action-map vocabulary:
/// `uiLabel`, `uiCategory`, `mapUiLabel` and `uiDescription`.
///
/// # Example
/// ```ignore
/// let fire = Action::new("v_attack1")
///     .with_label("Fire")
///     .with_group("Weapons")
///     .with_keyboard("{DikSpace}");
/// // Primary binding: Keyboard("{DikSpace}")
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Action {
    /// Unique internal name (lookup key)
    pub name: String,

    /// Human label shown in the picker
    #[serde(rename = "uiLabel", default)]
    pub display_label: String,

    /// Category used as the secondary sort key inside a group
    #[serde(rename = "uiCategory", default)]
    pub display_category: String,

    /// Group the action is listed under
    #[serde(rename = "mapUiLabel", default)]
    pub group_label: String,

    #[serde(rename = "uiDescription", default)]
    pub description: Option<String>,

    #[serde(default)]
    pub keyboard: Option<String>,

    #[serde(default)]
    pub mouse: Option<String>,

    #[serde(default)]
    pub joystick: Option<String>,

    #[serde(default)]
    pub gamepad: Option<String>,
}

impl Action {
    /// Creates an action with only its internal name set
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.display_label = label.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.display_category = category.to_string();
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group_label = group.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_keyboard(mut self, code: &str) -> Self {
        self.keyboard = Some(code.to_string());
        self
    }

    pub fn with_mouse(mut self, code: &str) -> Self {
        self.mouse = Some(code.to_string());
        self
    }

    pub fn with_joystick(mut self, code: &str) -> Self {
        self.joystick = Some(code.to_string());
        self
    }

    pub fn with_gamepad(mut self, code: &str) -> Self {
        self.gamepad = Some(code.to_string());
        self
    }

    /// Returns the first non-blank binding in device priority order
    ///
    /// Whitespace-only fields count as absent. The returned code is not
    /// trimmed.
    pub fn primary_binding(&self) -> Option<Binding> {
        if let Some(code) = non_blank(&self.keyboard) {
            return Some(Binding::Keyboard(code.to_string()));
        }
        if let Some(code) = non_blank(&self.mouse) {
            return Some(Binding::Mouse(code.to_string()));
        }
        if let Some(code) = non_blank(&self.joystick) {
            return Some(Binding::Joystick(code.to_string()));
        }
        non_blank(&self.gamepad).map(|code| Binding::Gamepad(code.to_string()))
    }

    /// True if any of the four binding fields is non-blank
    pub fn has_binding(&self) -> bool {
        self.primary_binding().is_some()
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

/// Visual state of a button as reported to the host
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum KeyState {
    Released = 0,
    Pressed = 1,
}

impl KeyState {
    /// Numeric state index used by the host protocol
    pub fn as_index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_index())
    }
}

/// One selectable option in the action picker
///
/// Identified by `value` alone; rebuilt from scratch on every index build.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CatalogueEntry {
    /// Internal action name
    pub value: String,

    /// Label with the bracketed primary binding, e.g. `Fire [Space]`
    pub text: String,

    /// Lowercased label, description and binding, space separated
    #[serde(rename = "searchText")]
    pub search_text: String,
}

/// A labelled, non-empty run of picker entries
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CatalogueGroup {
    pub label: String,

    #[serde(rename = "options")]
    pub entries: Vec<CatalogueEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_binding_prefers_keyboard() {
        let action = Action::new("fire")
            .with_keyboard("{DikSpace}")
            .with_mouse("mouse1");

        assert_eq!(
            action.primary_binding(),
            Some(Binding::Keyboard("{DikSpace}".to_string()))
        );
    }

    #[test]
    fn test_primary_binding_skips_blank_fields() {
        let action = Action::new("boost")
            .with_keyboard("   ")
            .with_mouse("")
            .with_joystick("js1_button3")
            .with_gamepad("gp1_a");

        assert_eq!(
            action.primary_binding(),
            Some(Binding::Joystick("js1_button3".to_string()))
        );
    }

    #[test]
    fn test_primary_binding_gamepad_last() {
        let action = Action::new("look").with_gamepad("gp1_thumbr");
        assert_eq!(action.primary_binding().map(|b| b.device()), Some(DeviceKind::Gamepad));
    }

    #[test]
    fn test_action_without_bindings() {
        let action = Action::new("unbound").with_label("Unbound");
        assert!(!action.has_binding());
        assert_eq!(action.primary_binding(), None);
    }

    #[test]
    fn test_binding_display() {
        let binding = Binding::Mouse("mouse2".to_string());
        assert_eq!(format!("{}", binding), "mouse:mouse2");
        assert_eq!(binding.code(), "mouse2");
    }

    #[test]
    fn test_key_state_index() {
        assert_eq!(KeyState::Released.as_index(), 0);
        assert_eq!(KeyState::Pressed.as_index(), 1);
    }

    #[test]
    fn test_action_deserialises_wire_names() {
        let json = r#"{
            "name": "v_attack1",
            "uiLabel": "Fire",
            "uiCategory": "Combat",
            "mapUiLabel": "Weapons",
            "keyboard": "{DikSpace}"
        }"#;

        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.display_label, "Fire");
        assert_eq!(action.group_label, "Weapons");
        assert_eq!(action.description, None);
        assert!(action.mouse.is_none());
    }

    #[test]
    fn test_group_serialises_options() {
        let group = CatalogueGroup {
            label: "Weapons".to_string(),
            entries: vec![CatalogueEntry {
                value: "v_attack1".to_string(),
                text: "Fire [Space]".to_string(),
                search_text: "fire  space".to_string(),
            }],
        };

        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["options"][0]["searchText"], "fire  space");
        assert_eq!(value["label"], "Weapons");
    }
}
