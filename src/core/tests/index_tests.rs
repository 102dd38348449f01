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

//! Action picker index tests
//!
//! - Grouping, ordering and empty-group removal
//! - Display and search text composition
//! - Key combo formatting across layouts
//! - Partial results when rendering fails

use std::sync::Arc;

use crate::core::index::format_key_combo;
use crate::core::keystring::KeyStringError;
use crate::core::{
    Action, BindingTable, CatalogueIndexBuilder, CatalogueStore, FixedLayoutSource, IndexError,
    IndexPayload, LayoutKeyRenderer, Locale, LocaleKeyRenderer,
};

/// Helper: builder over the table-driven renderer
fn builder() -> CatalogueIndexBuilder {
    CatalogueIndexBuilder::new(Arc::new(LayoutKeyRenderer::new()))
}

fn us() -> Locale {
    Locale::parse("en-US").unwrap()
}

/// Three groups, inserted out of order, one of them without bindings
fn unsorted_table() -> BindingTable {
    vec![
        Action::new("v_target_cycle")
            .with_label("Cycle Targets")
            .with_category("Targeting")
            .with_group("Weapons")
            .with_keyboard("{DikT}"),
        Action::new("v_attack1")
            .with_label("Fire")
            .with_category("Combat")
            .with_group("Weapons")
            .with_description("Fire the Selected Group")
            .with_keyboard("{DikLControl}{DikSpace}"),
        Action::new("v_boost")
            .with_label("Boost")
            .with_category("Flight")
            .with_group("Ship")
            .with_mouse("mouse2"),
        Action::new("v_afterburner")
            .with_label("Afterburner")
            .with_category("Flight")
            .with_group("Ship")
            .with_joystick("js1_button3"),
        Action::new("v_emote_wave")
            .with_label("Wave")
            .with_category("Emotes")
            .with_group("Social"),
        Action::new("v_alt_fire")
            .with_label("Alt Fire")
            .with_category("Combat")
            .with_group("Weapons")
            .with_gamepad("   "),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_groups_sorted_and_empty_dropped() {
    let groups = builder().build_for_locale(&unsorted_table(), &us());

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Ship", "Weapons"]);
}

#[test]
fn test_entries_sorted_by_category_then_label() {
    let groups = builder().build_for_locale(&unsorted_table(), &us());

    let ship: Vec<&str> = groups[0].entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(ship, vec!["v_afterburner", "v_boost"]);

    // Combat sorts before Targeting; blank-bound "Alt Fire" is skipped
    let weapons: Vec<&str> = groups[1].entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(weapons, vec!["v_attack1", "v_target_cycle"]);
}

#[test]
fn test_entry_text_and_search_text() {
    let groups = builder().build_for_locale(&unsorted_table(), &us());
    let fire = &groups[1].entries[0];

    assert_eq!(fire.text, "Fire [LCtrl+Space]");
    assert_eq!(fire.search_text, "fire fire the selected group lctrl+space");
}

#[test]
fn test_search_text_without_description() {
    let groups = builder().build_for_locale(&unsorted_table(), &us());
    let boost = &groups[0].entries[1];

    assert_eq!(boost.text, "Boost [mouse2]");
    // Missing description leaves an empty middle field
    assert_eq!(boost.search_text, "boost  mouse2");
}

#[test]
fn test_non_keyboard_devices_used_verbatim() {
    let table: BindingTable = vec![
        Action::new("a").with_label("A").with_group("G").with_joystick("js1_x"),
        Action::new("b").with_label("B").with_group("G").with_gamepad("gp_a"),
        Action::new("c")
            .with_label("C")
            .with_group("G")
            .with_keyboard("  ")
            .with_mouse("mwheel_up"),
    ]
    .into_iter()
    .collect();

    let groups = builder().build_for_locale(&table, &us());
    let texts: Vec<&str> = groups[0].entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["A [js1_x]", "B [gp_a]", "C [mwheel_up]"]);
}

#[test]
fn test_layout_changes_rendered_keys() {
    let table: BindingTable = vec![Action::new("v_zoom")
        .with_label("Zoom")
        .with_group("View")
        .with_keyboard("{DikLControl}{DikZ}")]
    .into_iter()
    .collect();

    let german = builder().build(&table, &FixedLayoutSource("00000407".to_string()));
    assert_eq!(german[0].entries[0].text, "Zoom [LStrg+Y]");

    let french = builder().build(&table, &FixedLayoutSource("fr_FR.UTF-8".to_string()));
    assert_eq!(french[0].entries[0].text, "Zoom [LCtrl+W]");
}

#[test]
fn test_unknown_layout_falls_back_to_us() {
    let table: BindingTable = vec![Action::new("v_zoom")
        .with_label("Zoom")
        .with_group("View")
        .with_keyboard("{DikZ}")]
    .into_iter()
    .collect();

    let groups = builder().build(&table, &FixedLayoutSource("not a layout!".to_string()));
    assert_eq!(groups[0].entries[0].text, "Zoom [Z]");
}

#[test]
fn test_build_is_deterministic() {
    let table = unsorted_table();
    let first = builder().build_for_locale(&table, &us());
    let second = builder().build_for_locale(&table, &us());

    assert_eq!(first, second);
}

#[test]
fn test_unloaded_store_builds_empty_index() {
    let groups = builder().build_for_locale(&CatalogueStore::new(), &us());
    assert!(groups.is_empty());
}

#[test]
fn test_format_key_combo() {
    assert_eq!(format_key_combo("{A}{B}"), "A+B");
    assert_eq!(format_key_combo("{DikLControl}{DikA}"), "LControl+A");
    assert_eq!(format_key_combo("{DikF1}"), "F1");
    assert_eq!(format_key_combo("Space"), "Space");
    assert_eq!(format_key_combo(""), "");
}

/// Renderer that rejects one specific key
struct FailingRenderer {
    reject: &'static str,
}

impl LocaleKeyRenderer for FailingRenderer {
    fn render(&self, code: &str, locale_name: &str) -> Result<String, IndexError> {
        if code == self.reject {
            return Err(IndexError::Render {
                code: code.to_string(),
                locale: locale_name.to_string(),
                source: KeyStringError::Empty,
            });
        }
        Ok(code.to_string())
    }
}

#[test]
fn test_render_failure_returns_partial_index() {
    let table: BindingTable = vec![
        Action::new("a").with_label("A").with_group("Alpha").with_keyboard("{DikA}"),
        Action::new("b").with_label("B").with_group("Beta").with_keyboard("{DikBad}"),
        Action::new("c").with_label("C").with_group("Gamma").with_keyboard("{DikC}"),
    ]
    .into_iter()
    .collect();

    let builder = CatalogueIndexBuilder::new(Arc::new(FailingRenderer { reject: "{DikBad}" }));
    let groups = builder.build_for_locale(&table, &us());

    // Alpha completed before the failure, nothing after it
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "Alpha");
}

#[test]
fn test_irregular_binding_keeps_index_whole() {
    let table: BindingTable = vec![
        Action::new("a")
            .with_label("A")
            .with_group("Alpha")
            .with_keyboard("{DikLAlt} {DikF}"),
        Action::new("b").with_label("B").with_group("Beta").with_keyboard("{DikB}"),
        Action::new("c").with_label("C").with_group("Gamma").with_mouse("mouse1"),
    ]
    .into_iter()
    .collect();

    let groups = builder().build_for_locale(&table, &us());

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(groups[0].entries[0].text, "A [LAlt F]");
    assert_eq!(groups[1].entries[0].text, "B [B]");
    assert_eq!(groups[2].entries[0].text, "C [mouse1]");
}

#[test]
fn test_unbalanced_binding_rendered_as_written() {
    let table: BindingTable = vec![
        Action::new("a").with_label("A").with_group("G").with_keyboard("{DikA"),
        Action::new("b").with_label("B").with_group("G").with_keyboard("{}{DikLControl}"),
    ]
    .into_iter()
    .collect();

    let groups = builder().build_for_locale(&table, &us());
    let texts: Vec<&str> = groups[0].entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["A [A]", "B [+LCtrl]"]);
}

#[test]
fn test_payload_wire_format() {
    let groups = builder().build_for_locale(&unsorted_table(), &us());
    let json = IndexPayload::loaded(groups).to_json().unwrap();

    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["functions", "functionsLoaded"]);

    assert_eq!(json["functionsLoaded"], serde_json::json!(true));
    assert_eq!(json["functions"][0]["label"], "Ship");
    assert_eq!(json["functions"][0]["options"][0]["value"], "v_afterburner");
    assert_eq!(json["functions"][0]["options"][0]["text"], "Afterburner [js1_button3]");
    assert_eq!(json["functions"][0]["options"][0]["searchText"], "afterburner  js1_button3");
}
