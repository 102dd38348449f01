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

//! Dual-action button - mediates between the host, the engine and the index
//!
//! # Responsibilities
//!
//! - Own the button's settings and click sound
//! - Forward press/release to the `DualActionEngine` and report the
//!   visual state back to the host
//! - Rebuild and push the action index whenever the configuration UI
//!   appears, completes its handshake, or the binding table reloads
//!
//! # Architecture
//!
//! The button knows the host only through `HostConnection` and the rest of
//! the process only through `ButtonServices`, so it runs unchanged against
//! recording doubles in tests.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::audio::{AudioEngine, FileSoundCache, SilentAudioEngine, SoundCache, SoundHandle};
use crate::config::{expand_path, ButtonConfig};
use crate::core::reload::ReloadSubscription;
use crate::core::{
    ActionCatalogue, BindingResolver, CatalogueIndexBuilder, CatalogueStore, DualActionEngine,
    EnvLayoutSource, IndexPayload, KeyState, KeyboardLayoutSource, LayoutKeyRenderer,
    LocaleKeyRenderer, Transition,
};
use crate::input::{InputContext, KeyEventSynthesizer};
use crate::plugin::host::HostConnection;

/// Handshake value sent by the configuration UI once it is connected
pub const PROPERTY_INSPECTOR_CONNECTED: &str = "propertyInspectorConnected";

/// Process-wide collaborators shared by every button
#[derive(Clone)]
pub struct ButtonServices {
    pub catalogue: Arc<CatalogueStore>,
    pub synthesizer: Arc<dyn KeyEventSynthesizer>,
    pub context: InputContext,
    pub renderer: Arc<dyn LocaleKeyRenderer>,
    pub layouts: Arc<dyn KeyboardLayoutSource>,
    pub sounds: Arc<dyn SoundCache>,
    pub audio: Arc<dyn AudioEngine>,
}

impl ButtonServices {
    /// Services with the default renderer, layout source and sound stack
    pub fn new(catalogue: Arc<CatalogueStore>, synthesizer: Arc<dyn KeyEventSynthesizer>) -> Self {
        Self {
            catalogue,
            synthesizer,
            context: InputContext::global(),
            renderer: Arc::new(LayoutKeyRenderer::new()),
            layouts: Arc::new(EnvLayoutSource),
            sounds: Arc::new(FileSoundCache),
            audio: Arc::new(SilentAudioEngine),
        }
    }

    pub fn with_context(mut self, context: InputContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_layouts(mut self, layouts: Arc<dyn KeyboardLayoutSource>) -> Self {
        self.layouts = layouts;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn LocaleKeyRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_sounds(mut self, sounds: Arc<dyn SoundCache>) -> Self {
        self.sounds = sounds;
        self
    }

    pub fn with_audio(mut self, audio: Arc<dyn AudioEngine>) -> Self {
        self.audio = audio;
        self
    }
}

/// One dual-action button instance
///
/// Handlers are called serially by the host. The reload subscription
/// taken at construction is released when the button is dropped.
pub struct DualActionButton {
    host: Arc<dyn HostConnection>,
    settings: ButtonConfig,
    engine: DualActionEngine,
    index_builder: CatalogueIndexBuilder,
    services: ButtonServices,
    click_sound: Option<SoundHandle>,
    reloads: ReloadSubscription,
}

impl DualActionButton {
    /// Creates a button from the host's initial settings payload
    ///
    /// Empty settings are replaced by defaults and written back to the
    /// host. The action index is pushed once if the catalogue is loaded.
    pub fn new(host: Arc<dyn HostConnection>, initial_settings: &Value, services: ButtonServices) -> Self {
        let (settings, is_default) = ButtonConfig::from_host(initial_settings);

        let catalogue: Arc<dyn ActionCatalogue> = services.catalogue.clone();
        let engine = DualActionEngine::new(
            BindingResolver::new(catalogue),
            services.synthesizer.clone(),
            services.context.clone(),
        );
        let index_builder = CatalogueIndexBuilder::new(services.renderer.clone());
        let reloads = services.catalogue.subscribe();

        let mut button = Self {
            host,
            settings,
            engine,
            index_builder,
            services,
            click_sound: None,
            reloads,
        };

        if is_default {
            button.host.set_settings(button.settings.to_json());
        } else {
            button.load_click_sound();
        }

        button.update_property_inspector();
        button
    }

    pub fn settings(&self) -> &ButtonConfig {
        &self.settings
    }

    pub fn has_click_sound(&self) -> bool {
        self.click_sound.is_some()
    }

    /// Host reported a key press
    pub fn key_pressed(&self) {
        if self.engine.on_activate(&self.settings) == Transition::Halted {
            debug!("catalogue unavailable, press ignored");
            return;
        }

        self.host.set_state(KeyState::Pressed);
        self.play_click_sound();
    }

    /// Host reported a key release
    pub fn key_released(&self) {
        if self.engine.on_deactivate(&self.settings) == Transition::Halted {
            debug!("catalogue unavailable, release ignored");
            return;
        }

        self.host.set_state(KeyState::Released);
    }

    /// Host delivered (possibly partial) settings
    pub fn received_settings(&mut self, partial: &Value) {
        let merged = self.settings.merge_partial(partial);
        debug!(merged, "settings received");
        self.load_click_sound();
    }

    pub fn property_inspector_did_appear(&self) {
        self.update_property_inspector();
    }

    /// Message from the configuration UI; only the connect handshake counts
    pub fn send_to_plugin(&self, payload: &Value) {
        let handshake = payload
            .get("property_inspector")
            .and_then(Value::as_str)
            .is_some_and(|value| value == PROPERTY_INSPECTOR_CONNECTED);

        if handshake {
            self.update_property_inspector();
        }
    }

    /// Rebuilds the index if the binding table reloaded since the last poll
    pub fn poll_reloads(&self) -> bool {
        match self.reloads.check_for_reload() {
            Some(event) => {
                info!(generation = event.generation, "binding table reloaded, refreshing index");
                self.update_property_inspector();
                true
            }
            None => false,
        }
    }

    /// Rebuilds the action index and pushes it to the configuration UI
    ///
    /// Does nothing while the catalogue is unloaded. Returns whether a
    /// payload was pushed.
    pub fn update_property_inspector(&self) -> bool {
        let catalogue = &self.services.catalogue;
        if !catalogue.is_loaded() {
            return false;
        }

        let functions = self
            .index_builder
            .build(&**catalogue, &*self.services.layouts);
        match IndexPayload::loaded(functions).to_json() {
            Ok(payload) => {
                self.host.send_to_property_inspector(payload);
                true
            }
            Err(e) => {
                error!(error = %e, "cannot serialise action index");
                false
            }
        }
    }

    fn load_click_sound(&mut self) {
        self.click_sound = None;

        let Some(raw) = self
            .settings
            .click_sound_path
            .as_deref()
            .filter(|p| !p.is_empty())
        else {
            return;
        };

        let path = match expand_path(raw) {
            Ok(path) if path.exists() => path,
            Ok(_) => return,
            Err(e) => {
                warn!(path = raw, error = %e, "click sound path not usable");
                return;
            }
        };

        match self.services.sounds.load(&path) {
            Ok(sound) => self.click_sound = Some(sound),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "click sound disabled");
                self.settings.click_sound_path = None;
            }
        }
    }

    fn play_click_sound(&self) {
        let Some(sound) = &self.click_sound else {
            return;
        };

        if let Err(e) = self.services.audio.play(sound) {
            debug!(error = %e, "click sound playback failed");
        }
    }
}
