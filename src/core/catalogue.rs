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

//! src/core/catalogue.rs
//!
//! The action catalogue: every known logical action and its bindings
//!
//! - `ActionCatalogue`: read-only view consumed by the resolver and the
//!   index builder
//! - `BindingTable`: one loaded snapshot, keyed by action name
//! - `CatalogueStore`: the reloadable, shared catalogue. It starts
//!   unloaded and publishes a reload notification every time a new table
//!   replaces the old one.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, PoisonError, RwLock,
    },
};
use tracing::info;

use crate::core::reload::{ReloadBus, ReloadEvent, ReloadSubscription};
use crate::core::types::Action;

/// Read-only access to the current set of actions
pub trait ActionCatalogue: Send + Sync {
    /// Exact, case-sensitive lookup by internal name
    fn lookup(&self, name: &str) -> Option<Action>;

    /// Every action, ordered by name
    fn all_actions(&self) -> Vec<Action>;

    /// False until a binding table has been loaded
    fn is_loaded(&self) -> bool;
}

/// A loaded binding table
///
/// Backed by a `BTreeMap` so enumeration order only depends on content.
/// Inserting a name twice keeps the later action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingTable {
    actions: BTreeMap<String, Action>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, action: Action) {
        self.actions.insert(action.name.clone(), action);
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }
}

impl FromIterator<Action> for BindingTable {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        let mut table = BindingTable::new();
        for action in iter {
            table.insert(action);
        }
        table
    }
}

impl ActionCatalogue for BindingTable {
    fn lookup(&self, name: &str) -> Option<Action> {
        self.get(name).cloned()
    }

    fn all_actions(&self) -> Vec<Action> {
        self.iter().cloned().collect()
    }

    fn is_loaded(&self) -> bool {
        true
    }
}

/// Shared, reloadable catalogue
///
/// Readers take a snapshot of the current table; a reload swaps the
/// snapshot atomically and then notifies subscribers.
#[derive(Default)]
pub struct CatalogueStore {
    table: RwLock<Option<Arc<BindingTable>>>,
    generation: AtomicU64,
    reloads: ReloadBus,
}

impl CatalogueStore {
    /// Creates an unloaded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `table`
    pub fn with_table(table: BindingTable) -> Self {
        let store = Self::new();
        *store.write_slot() = Some(Arc::new(table));
        store.generation.store(1, Ordering::SeqCst);
        store
    }

    /// Replaces the current table and notifies every subscriber
    ///
    /// Returns the new load generation.
    pub fn replace(&self, table: BindingTable) -> u64 {
        let count = table.len();
        *self.write_slot() = Some(Arc::new(table));

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let notified = self.reloads.publish(ReloadEvent { generation });

        info!(actions = count, generation, notified, "binding table reloaded");
        generation
    }

    /// Drops the current table; the store reports unloaded afterwards
    pub fn clear(&self) {
        *self.write_slot() = None;
        info!("binding table unloaded");
    }

    /// Current table, if any
    pub fn snapshot(&self) -> Option<Arc<BindingTable>> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Subscribes to reload notifications
    pub fn subscribe(&self) -> ReloadSubscription {
        self.reloads.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.reloads.subscriber_count()
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Option<Arc<BindingTable>>> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ActionCatalogue for CatalogueStore {
    fn lookup(&self, name: &str) -> Option<Action> {
        self.snapshot()?.lookup(name)
    }

    fn all_actions(&self) -> Vec<Action> {
        self.snapshot()
            .map(|table| table.all_actions())
            .unwrap_or_default()
    }

    fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }
}
