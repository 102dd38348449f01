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

//! Dual-action button tests
//!
//! Drives the button through its host handlers with recording doubles
//! for the host, the key synthesizer and audio output.

use serde_json::{json, Value};
use std::{fs, sync::Arc};
use tempfile::TempDir;

use crate::audio::RecordingAudioEngine;
use crate::core::{Action, BindingTable, CatalogueStore, FixedLayoutSource, KeyState};
use crate::input::{InputContext, RecordingSynthesizer, SynthEvent};
use crate::plugin::{ButtonServices, DualActionButton, HostMessage, RecordingHost};

/// Helper: test rig around one button's collaborators
struct Rig {
    store: Arc<CatalogueStore>,
    synth: Arc<RecordingSynthesizer>,
    host: Arc<RecordingHost>,
    audio: Arc<RecordingAudioEngine>,
    context: InputContext,
}

impl Rig {
    fn new(store: CatalogueStore) -> Self {
        Self {
            store: Arc::new(store),
            synth: Arc::new(RecordingSynthesizer::new()),
            host: Arc::new(RecordingHost::new()),
            audio: Arc::new(RecordingAudioEngine::new()),
            context: InputContext::new(),
        }
    }

    fn loaded() -> Self {
        Self::new(CatalogueStore::with_table(weapons_table()))
    }

    fn button(&self, settings: Value) -> DualActionButton {
        let services = ButtonServices::new(self.store.clone(), self.synth.clone())
            .with_context(self.context.clone())
            .with_layouts(Arc::new(FixedLayoutSource("en-US".to_string())))
            .with_audio(self.audio.clone());

        DualActionButton::new(self.host.clone(), &settings, services)
    }
}

fn weapons_table() -> BindingTable {
    vec![
        Action::new("Fire")
            .with_label("Fire")
            .with_category("Combat")
            .with_group("Weapons")
            .with_keyboard("{DikSpace}"),
        Action::new("Reload")
            .with_label("Reload")
            .with_category("Combat")
            .with_group("Weapons")
            .with_keyboard("{DikR}"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_same_action_press_release_cycle() {
    let rig = Rig::loaded();
    let button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));
    rig.host.clear();

    button.key_pressed();
    button.key_released();

    assert_eq!(rig.synth.downs(), 1);
    assert_eq!(rig.synth.ups(), 1);
    assert_eq!(rig.synth.taps(), 0);
    assert_eq!(rig.host.states(), vec![KeyState::Pressed, KeyState::Released]);
    assert!(!rig.context.force_stop.is_set());
}

#[test]
fn test_distinct_actions_tap_on_release() {
    let rig = Rig::loaded();
    let button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Reload" }));

    button.key_pressed();
    button.key_released();

    let events = rig.synth.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], SynthEvent::Down(b) if b.code() == "{DikSpace}"));
    assert!(matches!(&events[1], SynthEvent::Up(b) if b.code() == "{DikSpace}"));
    assert!(matches!(
        &events[2],
        SynthEvent::Tap { binding, hold_millis: 40 } if binding.code() == "{DikR}"
    ));
}

#[test]
fn test_default_settings_written_back() {
    let rig = Rig::loaded();
    let button = rig.button(json!({}));

    assert_eq!(button.settings().down_action_name, "");
    let settings: Vec<_> = rig
        .host
        .messages()
        .into_iter()
        .filter(|m| matches!(m, HostMessage::Settings(_)))
        .collect();
    assert_eq!(settings.len(), 1);
}

#[test]
fn test_configured_settings_not_written_back() {
    let rig = Rig::loaded();
    let _button = rig.button(json!({ "downFunction": "Fire", "upFunction": "" }));

    assert!(!rig
        .host
        .messages()
        .iter()
        .any(|m| matches!(m, HostMessage::Settings(_))));
}

#[test]
fn test_unloaded_catalogue_reports_nothing() {
    let rig = Rig::new(CatalogueStore::new());
    let button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));

    button.key_pressed();
    button.key_released();

    assert!(rig.host.states().is_empty());
    assert!(rig.synth.events().is_empty());
    assert!(rig.context.force_stop.is_set());
    // No index push while unloaded
    assert!(rig.host.inspector_payloads().is_empty());
}

#[test]
fn test_force_stop_clears_once_loaded() {
    let rig = Rig::new(CatalogueStore::new());
    let button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));

    button.key_pressed();
    assert!(rig.context.force_stop.is_set());

    rig.store.replace(weapons_table());
    button.key_pressed();

    assert!(!rig.context.force_stop.is_set());
    assert_eq!(rig.host.states(), vec![KeyState::Pressed]);
}

#[test]
fn test_construction_pushes_index() {
    let rig = Rig::loaded();
    let _button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));

    let payloads = rig.host.inspector_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["functionsLoaded"], json!(true));
    assert_eq!(payloads[0]["functions"][0]["label"], json!("Weapons"));
    assert_eq!(payloads[0]["functions"][0]["options"][0]["value"], json!("Fire"));
    assert_eq!(
        payloads[0]["functions"][0]["options"][0]["text"],
        json!("Fire [Space]")
    );
}

#[test]
fn test_handshake_triggers_push() {
    let rig = Rig::loaded();
    let button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));
    rig.host.clear();

    button.send_to_plugin(&json!({ "property_inspector": "propertyInspectorConnected" }));
    assert_eq!(rig.host.inspector_payloads().len(), 1);

    button.send_to_plugin(&json!({ "property_inspector": "somethingElse" }));
    button.send_to_plugin(&json!({ "other": "propertyInspectorConnected" }));
    button.send_to_plugin(&json!("propertyInspectorConnected"));
    assert_eq!(rig.host.inspector_payloads().len(), 1);

    button.property_inspector_did_appear();
    assert_eq!(rig.host.inspector_payloads().len(), 2);
}

#[test]
fn test_reload_refreshes_index() {
    let rig = Rig::loaded();
    let button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));
    rig.host.clear();

    assert!(!button.poll_reloads());

    let table: BindingTable = vec![Action::new("Boost")
        .with_label("Boost")
        .with_group("Ship")
        .with_mouse("mouse2")]
    .into_iter()
    .collect();
    rig.store.replace(table);

    assert!(button.poll_reloads());
    let payloads = rig.host.inspector_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["functions"][0]["label"], json!("Ship"));

    // Drained
    assert!(!button.poll_reloads());
}

#[test]
fn test_drop_releases_subscription() {
    let rig = Rig::loaded();
    let button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));
    assert_eq!(rig.store.subscriber_count(), 1);

    drop(button);
    assert_eq!(rig.store.subscriber_count(), 0);
}

#[test]
fn test_received_settings_merges_partial() {
    let rig = Rig::loaded();
    let mut button = rig.button(json!({ "downFunction": "Fire", "upFunction": "Fire" }));

    button.received_settings(&json!({ "upFunction": "Reload" }));
    assert_eq!(button.settings().down_action_name, "Fire");
    assert_eq!(button.settings().up_action_name, "Reload");

    button.key_pressed();
    button.key_released();
    assert_eq!(rig.synth.taps(), 1);
}

#[test]
fn test_click_sound_plays_on_press() {
    let temp_dir = TempDir::new().unwrap();
    let sound = temp_dir.path().join("click.wav");
    fs::write(&sound, b"RIFF0000WAVE").unwrap();

    let rig = Rig::loaded();
    let button = rig.button(json!({
        "downFunction": "Fire",
        "upFunction": "Fire",
        "clickSound": sound.to_str().unwrap(),
    }));

    assert!(button.has_click_sound());
    button.key_pressed();
    button.key_released();

    assert_eq!(rig.audio.played(), vec![sound]);
}

#[test]
fn test_unloadable_click_sound_is_cleared() {
    let temp_dir = TempDir::new().unwrap();
    let sound = temp_dir.path().join("empty.wav");
    fs::write(&sound, b"").unwrap();

    let rig = Rig::loaded();
    let button = rig.button(json!({
        "downFunction": "Fire",
        "upFunction": "Fire",
        "clickSound": sound.to_str().unwrap(),
    }));

    assert!(!button.has_click_sound());
    assert_eq!(button.settings().click_sound_path, None);

    button.key_pressed();
    assert!(rig.audio.played().is_empty());
}

#[test]
fn test_missing_click_sound_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let sound = temp_dir.path().join("missing.wav");

    let rig = Rig::loaded();
    let button = rig.button(json!({
        "downFunction": "Fire",
        "upFunction": "Fire",
        "clickSound": sound.to_str().unwrap(),
    }));

    assert!(!button.has_click_sound());
    // Path kept so the file can appear later
    assert!(button.settings().click_sound_path.is_some());
}
