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

//! Locale-aware key display names
//!
//! Binding tables name keys by their US-layout scan-code position. On
//! other layouts the key at that position carries a different legend:
//! the `Y` position reads `Z` on a German keyboard, `A` reads `Q` on a
//! French one. `LayoutKeyRenderer` rewrites every token of a key string
//! to the legend of the requested layout and keeps the brace markup and
//! the scan-code marker intact, so the output is still key-string markup.
//!
//! Markup the key-string parser rejects (stray spaces, unbalanced or empty
//! braces) is still rendered: each well-formed `{Name}` token is mapped and
//! everything around it is kept as written.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

use crate::core::index::IndexError;
use crate::core::keystring::{parse_key_string, KEY_MARKER};

static BRACED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^{}]+)\}").expect("braced token pattern should be valid regex")
});

/// Renders key-string markup for a locale
pub trait LocaleKeyRenderer: Send + Sync {
    fn render(&self, code: &str, locale_name: &str) -> Result<String, IndexError>;
}

/// Friendly names shared by every layout
const COMMON_NAMES: &[(&str, &str)] = &[
    ("LControl", "LCtrl"),
    ("RControl", "RCtrl"),
    ("LMenu", "LAlt"),
    ("RMenu", "RAlt"),
    ("Return", "Enter"),
    ("Capital", "CapsLock"),
    ("Prior", "PageUp"),
    ("Next", "PageDown"),
];

const GERMAN_LEGENDS: &[(&str, &str)] = &[
    ("Y", "Z"),
    ("Z", "Y"),
    ("LControl", "LStrg"),
    ("RControl", "RStrg"),
    ("Semicolon", "Ö"),
    ("Apostrophe", "Ä"),
    ("LBracket", "Ü"),
    ("Minus", "ß"),
];

const FRENCH_LEGENDS: &[(&str, &str)] = &[
    ("A", "Q"),
    ("Q", "A"),
    ("W", "Z"),
    ("Z", "W"),
    ("Semicolon", "M"),
    ("M", "Comma"),
];

/// Table-driven renderer for the common Latin layouts
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutKeyRenderer;

impl LayoutKeyRenderer {
    pub fn new() -> Self {
        Self
    }

    fn legends_for(locale_name: &str) -> &'static [(&'static str, &'static str)] {
        match locale_name.split('-').next().unwrap_or_default() {
            "de" => GERMAN_LEGENDS,
            "fr" => FRENCH_LEGENDS,
            _ => &[],
        }
    }

    /// Legend for one marker-free key name
    pub fn key_legend(name: &str, locale_name: &str) -> String {
        let lookup = |table: &[(&str, &str)]| {
            table
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, legend)| (*legend).to_string())
        };

        lookup(Self::legends_for(locale_name))
            .or_else(|| lookup(COMMON_NAMES))
            .unwrap_or_else(|| name.to_string())
    }

    fn render_token(marked: bool, name: &str, locale_name: &str) -> String {
        let marker = if marked { KEY_MARKER } else { "" };
        format!("{{{}{}}}", marker, Self::key_legend(name, locale_name))
    }

    /// Maps each `{Name}` token in place and leaves the rest untouched
    fn render_lenient(code: &str, locale_name: &str) -> String {
        BRACED_TOKEN
            .replace_all(code, |caps: &Captures| {
                let raw = &caps[1];
                match raw.strip_prefix(KEY_MARKER) {
                    Some(name) => Self::render_token(true, name, locale_name),
                    None => Self::render_token(false, raw, locale_name),
                }
            })
            .into_owned()
    }
}

impl LocaleKeyRenderer for LayoutKeyRenderer {
    fn render(&self, code: &str, locale_name: &str) -> Result<String, IndexError> {
        let tokens = match parse_key_string(code) {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!(code, error = %e, "irregular key string, mapping braced tokens only");
                return Ok(Self::render_lenient(code, locale_name));
            }
        };

        let rendered: String = tokens
            .iter()
            .map(|token| Self::render_token(token.is_marked(), &token.name, locale_name))
            .collect();

        Ok(rendered)
    }
}
