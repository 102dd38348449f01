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

//! src/core/locale.rs
//!
//! Keyboard-layout locales
//!
//! The active keyboard layout is reported as an opaque identifier. This
//! module turns it into a `Locale`:
//! - Windows keyboard layout ids (KLID, eight hex digits, e.g. `00000407`)
//!   map through their language id
//! - POSIX-style names (`de_DE.UTF-8`) and language tags (`fr-FR`, `en`)
//!   are normalised to `ll-RR` / `ll`
//!
//! Anything else is rejected; callers fall back to `en-US`.

use regex::Regex;
use std::{env, fmt, sync::LazyLock};
use tracing::warn;

use crate::core::index::IndexError;

/// Locale used when the active layout cannot be identified
pub const DEFAULT_LOCALE: &str = "en-US";

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:-([A-Za-z]{2}))?$")
        .expect("language tag pattern should be valid regex")
});

static KLID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{8}$").expect("keyboard layout id pattern should be valid regex")
});

/// Language id (low word of a KLID) → locale tag
const KLID_LANGUAGES: &[(&str, &str)] = &[
    ("0406", "da-DK"),
    ("0407", "de-DE"),
    ("0409", "en-US"),
    ("040A", "es-ES"),
    ("040C", "fr-FR"),
    ("0410", "it-IT"),
    ("0411", "ja-JP"),
    ("0413", "nl-NL"),
    ("0414", "nb-NO"),
    ("0415", "pl-PL"),
    ("0416", "pt-BR"),
    ("0419", "ru-RU"),
    ("041D", "sv-SE"),
    ("0807", "de-CH"),
    ("0809", "en-GB"),
    ("080C", "fr-BE"),
    ("0816", "pt-PT"),
    ("0C0A", "es-ES"),
    ("0C0C", "fr-CA"),
];

/// A validated `ll` or `ll-RR` locale tag
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Locale {
    tag: String,
}

impl Locale {
    /// Builds a locale from a keyboard layout identifier
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(Locale::parse("00000407")?.name(), "de-DE");
    /// assert_eq!(Locale::parse("fr_FR.UTF-8")?.name(), "fr-FR");
    /// ```
    pub fn parse(id: &str) -> Result<Self, IndexError> {
        let trimmed = id.trim();

        if KLID_PATTERN.is_match(trimmed) {
            let language = trimmed[4..].to_uppercase();
            return KLID_LANGUAGES
                .iter()
                .find(|(lang_id, _)| *lang_id == language)
                .map(|(_, tag)| Locale {
                    tag: (*tag).to_string(),
                })
                .ok_or_else(|| IndexError::InvalidLocale(id.to_string()));
        }

        // Drop ".UTF-8" / "@euro" suffixes of POSIX locale names
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('_', "-");

        let captures = TAG_PATTERN
            .captures(&base)
            .ok_or_else(|| IndexError::InvalidLocale(id.to_string()))?;

        let language = captures[1].to_lowercase();
        let tag = match captures.get(2) {
            Some(region) => format!("{}-{}", language, region.as_str().to_uppercase()),
            None => language,
        };

        Ok(Locale { tag })
    }

    /// The fixed fallback locale
    pub fn fallback() -> Self {
        Locale {
            tag: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Resolves the active layout, falling back to `en-US`
    pub fn from_layout(source: &dyn KeyboardLayoutSource) -> Self {
        let Some(id) = source.current_layout_id() else {
            return Self::fallback();
        };

        match Self::parse(&id) {
            Ok(locale) => locale,
            Err(e) => {
                warn!(layout = %id, error = %e, "unknown keyboard layout, using {}", DEFAULT_LOCALE);
                Self::fallback()
            }
        }
    }

    /// Full tag, e.g. `de-DE`
    pub fn name(&self) -> &str {
        &self.tag
    }

    /// Language subtag, e.g. `de`
    pub fn language(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

/// Reports the identifier of the active keyboard layout
pub trait KeyboardLayoutSource: Send + Sync {
    fn current_layout_id(&self) -> Option<String>;
}

/// Always reports the same layout
#[derive(Clone, Debug)]
pub struct FixedLayoutSource(pub String);

impl KeyboardLayoutSource for FixedLayoutSource {
    fn current_layout_id(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Reads `KEYBOARD_LAYOUT`, then `LANG`
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvLayoutSource;

impl KeyboardLayoutSource for EnvLayoutSource {
    fn current_layout_id(&self) -> Option<String> {
        ["KEYBOARD_LAYOUT", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.trim().is_empty())
    }
}
