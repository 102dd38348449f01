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

//! Logical action name → physical binding

use std::sync::Arc;
use tracing::debug;

use crate::core::catalogue::ActionCatalogue;
use crate::core::types::Binding;

/// Resolves action names against a shared catalogue
///
/// `None` means "nothing to do": the name is unknown, the catalogue is not
/// loaded yet, or the action has no binding on any device.
#[derive(Clone)]
pub struct BindingResolver {
    catalogue: Arc<dyn ActionCatalogue>,
}

impl BindingResolver {
    pub fn new(catalogue: Arc<dyn ActionCatalogue>) -> Self {
        Self { catalogue }
    }

    /// True once the underlying catalogue has a table loaded
    pub fn is_available(&self) -> bool {
        self.catalogue.is_loaded()
    }

    pub fn resolve(&self, name: &str) -> Option<Binding> {
        if !self.catalogue.is_loaded() {
            return None;
        }

        let binding = self.catalogue.lookup(name)?.primary_binding();
        debug!(action = name, binding = ?binding, "resolved action");
        binding
    }
}
