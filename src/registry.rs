// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Registry of tracked callables.
//!
//! A [`CallRegistry`] owns the counter of every callable wrapped through it
//! and answers count queries across all of them. Create one per component
//! (or per test) and drop or [`clear`](CallRegistry::clear) it at teardown;
//! [`GLOBAL_REGISTRY`] is available for code that prefers a process-wide
//! instance.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, warn};

use crate::callable::{Callable, CallableId};
use crate::config::ResolvedConfig;
use crate::error::{Result, TrackerError};
use crate::output::Output;
use crate::signature::Signature;
use crate::tracker::{TrackedCallable, TrackerState};

/// Global registry instance.
pub static GLOBAL_REGISTRY: Lazy<CallRegistry> = Lazy::new(CallRegistry::new);

/// Table of tracked callables keyed by identity.
#[derive(Debug)]
pub struct CallRegistry {
    entries: RwLock<HashMap<CallableId, Arc<TrackerState>>>,

    /// Output handed to trackers created from now on.
    output: RwLock<Output>,

    next_seq: AtomicU64,
}

impl CallRegistry {
    /// Create an empty registry with the default output (plain text to stdout).
    pub fn new() -> Self {
        Self::with_output(Output::default())
    }

    /// Create an empty registry whose trackers use `output`.
    pub fn with_output(output: Output) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            output: RwLock::new(output),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Create an empty registry configured from resolved settings.
    pub fn with_config(config: &ResolvedConfig) -> Self {
        Self::with_output(config.build_output())
    }

    /// Replace the output used by trackers wrapped after this call.
    ///
    /// Existing trackers keep the output they were created with.
    pub fn set_output(&self, output: Output) {
        *self.output.write().unwrap_or_else(PoisonError::into_inner) = output;
    }

    /// Wrap a callable and register its counter.
    ///
    /// Fails with [`TrackerError::Introspection`] when the callable has no
    /// usable parameter list, or when the list it reports is malformed (a
    /// required parameter after a defaulted one, a repeated name). Wrapping the same callable again creates an
    /// independent counter that replaces the earlier one in this registry;
    /// the earlier wrapper keeps counting on its own.
    pub fn wrap<C: Callable>(&self, callable: C) -> Result<TrackedCallable<C>> {
        let signature = callable.signature()?;
        signature
            .validate()
            .map_err(|e| TrackerError::introspection(callable.name(), e.to_string()))?;
        let id = callable.id();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let state = Arc::new(TrackerState::new(
            id,
            callable.name().to_string(),
            signature,
            seq,
        ));

        let replaced = self.write_entries().insert(id, Arc::clone(&state));
        if replaced.is_some() {
            debug!(callable = %state.name(), id = %id.short(), "Re-wrapped callable, previous counter detached");
        } else {
            debug!(callable = %state.name(), id = %id.short(), "Registered callable");
        }

        let output = self.output.read().unwrap_or_else(PoisonError::into_inner).clone();
        Ok(TrackedCallable::new(callable, state, output))
    }

    /// Current count of a registered callable.
    pub fn count(&self, id: CallableId) -> Result<u64> {
        self.lookup(id).map(|state| state.count())
    }

    /// Reset one callable's count to zero.
    pub fn reset_count(&self, id: CallableId) -> Result<()> {
        let state = self.lookup(id)?;
        state.reset();
        debug!(callable = %state.name(), "Reset call count");
        Ok(())
    }

    /// Counts keyed by display name.
    ///
    /// Distinct callables sharing a name collide here: the one registered
    /// last wins and a warning is logged. Use [`counts_by_id`](Self::counts_by_id)
    /// for a collision-free view.
    pub fn all_counts(&self) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for state in self.ordered_states() {
            if let Some(previous) = counts.insert(state.name().to_string(), state.count()) {
                warn!(
                    callable = %state.name(),
                    shadowed_count = previous,
                    "Several tracked callables share this name; reporting the latest"
                );
            }
        }
        counts
    }

    /// Counts keyed by callable identity.
    pub fn counts_by_id(&self) -> HashMap<CallableId, u64> {
        self.read_entries()
            .iter()
            .map(|(id, state)| (*id, state.count()))
            .collect()
    }

    /// Display names used by more than one registered callable.
    pub fn colliding_names(&self) -> Vec<String> {
        let entries = self.read_entries();
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for state in entries.values() {
            *seen.entry(state.name()).or_default() += 1;
        }
        seen.into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Reset every registered count to zero.
    pub fn reset_all_counts(&self) {
        let entries = self.read_entries();
        for state in entries.values() {
            state.reset();
        }
        debug!(callables = entries.len(), "Reset all call counts");
    }

    /// Snapshot of every registered callable, in registration order.
    pub fn all_tracked(&self) -> Vec<TrackedEntry> {
        self.ordered_states()
            .iter()
            .map(|state| TrackedEntry::from_state(state))
            .collect()
    }

    /// Take a snapshot suitable for reporting.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            entries: self.all_tracked(),
        }
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: CallableId) -> bool {
        self.read_entries().contains_key(&id)
    }

    /// Number of registered callables.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Remove every entry.
    ///
    /// Wrappers created earlier keep working and counting; they are no
    /// longer visible through this registry.
    pub fn clear(&self) {
        self.write_entries().clear();
        debug!("Cleared call registry");
    }

    fn lookup(&self, id: CallableId) -> Result<Arc<TrackerState>> {
        self.read_entries()
            .get(&id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))
    }

    fn ordered_states(&self) -> Vec<Arc<TrackerState>> {
        let mut states: Vec<_> = self.read_entries().values().cloned().collect();
        states.sort_by_key(|state| state.seq());
        states
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<CallableId, Arc<TrackerState>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<CallableId, Arc<TrackerState>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CallRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered callable as seen at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEntry {
    pub id: CallableId,
    pub name: String,
    pub signature: Signature,
    pub count: u64,
}

impl TrackedEntry {
    fn from_state(state: &TrackerState) -> Self {
        Self {
            id: state.id(),
            name: state.name().to_string(),
            signature: state.signature().clone(),
            count: state.count(),
        }
    }
}

/// All registered callables at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    /// Entries in registration order.
    pub entries: Vec<TrackedEntry>,
}

impl RegistrySnapshot {
    /// Sum of all counts.
    pub fn total_calls(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Format as a human-readable report.
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Call Counts ===\n\n");
        report.push_str(&format!(
            "Tracked: {} callables, {} calls\n",
            self.entries.len(),
            self.total_calls()
        ));

        if !self.entries.is_empty() {
            report.push('\n');
            for entry in &self.entries {
                let params: Vec<&str> = entry
                    .signature
                    .params()
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect();
                report.push_str(&format!(
                    "  {}({}): {} calls\n",
                    entry.name,
                    params.join(", "),
                    entry.count
                ));
            }
        }

        report
    }
}

/// Wrap a callable in the global registry.
pub fn track<C: Callable>(callable: C) -> Result<TrackedCallable<C>> {
    GLOBAL_REGISTRY.wrap(callable)
}

/// Count of a callable in the global registry.
pub fn count(id: CallableId) -> Result<u64> {
    GLOBAL_REGISTRY.count(id)
}

/// Reset one callable's count in the global registry.
pub fn reset_count(id: CallableId) -> Result<()> {
    GLOBAL_REGISTRY.reset_count(id)
}

/// Name-keyed counts from the global registry.
pub fn all_counts() -> BTreeMap<String, u64> {
    GLOBAL_REGISTRY.all_counts()
}

/// Reset every count in the global registry.
pub fn reset_all_counts() {
    GLOBAL_REGISTRY.reset_all_counts()
}

/// Every callable registered in the global registry.
pub fn all_tracked() -> Vec<TrackedEntry> {
    GLOBAL_REGISTRY.all_tracked()
}
