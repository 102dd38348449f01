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

//! Process-wide input coordination
//!
//! The force-stop flag is a coarse kill-switch shared by every button.
//! Any handler may set or clear it and the last writer wins; it does not
//! order anything between buttons.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, OnceLock,
};

/// Shared force-stop flag, initialised to false
#[derive(Clone, Debug, Default)]
pub struct ForceStop {
    flag: Arc<AtomicBool>,
}

impl ForceStop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Coordination state shared by all button instances
///
/// Buttons hold clones; the state itself lives as long as any clone.
#[derive(Clone, Debug, Default)]
pub struct InputContext {
    pub force_stop: ForceStop,
}

impl InputContext {
    /// Creates an isolated context (tests, embedding)
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide context, created on first use
    pub fn global() -> InputContext {
        static GLOBAL: OnceLock<InputContext> = OnceLock::new();
        GLOBAL.get_or_init(InputContext::new).clone()
    }
}
