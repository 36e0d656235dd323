// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The call tracker: a counting, describing wrapper around a callable.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::trace;

use crate::args::CallArgs;
use crate::callable::{Callable, CallableId};
use crate::description::CallDescription;
use crate::output::Output;
use crate::signature::Signature;

/// Counter and metadata shared between a tracker and its registry entry.
#[derive(Debug)]
pub struct TrackerState {
    id: CallableId,
    name: String,
    signature: Signature,
    calls: AtomicU64,
    seq: u64,
}

impl TrackerState {
    pub(crate) fn new(id: CallableId, name: String, signature: Signature, seq: u64) -> Self {
        Self {
            id,
            name,
            signature,
            calls: AtomicU64::new(0),
            seq,
        }
    }

    /// Increment the counter and return the new value.
    pub fn record_call(&self) -> u64 {
        self.calls.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current number of recorded calls.
    pub fn count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Set the counter back to zero.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
    }

    pub fn id(&self) -> CallableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Registration order within the owning registry.
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}

/// A wrapped callable.
///
/// Created by [`CallRegistry::wrap`](crate::CallRegistry::wrap). Each call
/// increments the counter, emits a description of the call, then runs the
/// wrapped callable and returns whatever it returned.
pub struct TrackedCallable<C> {
    callable: C,
    state: Arc<TrackerState>,
    output: Output,
}

impl<C: Callable> TrackedCallable<C> {
    pub(crate) fn new(callable: C, state: Arc<TrackerState>, output: Output) -> Self {
        Self {
            callable,
            state,
            output,
        }
    }

    /// Invoke the wrapped callable.
    ///
    /// The counter is incremented before the callable runs, so a call that
    /// fails or panics is still counted.
    pub fn call(&self, args: &CallArgs) -> C::Output {
        let call = self.state.record_call();
        trace!(callable = %self.state.name(), call, "Tracked call");

        if self.output.is_enabled() {
            let desc = CallDescription::bind(self.state.name(), call, self.state.signature(), args);
            self.output.emit(&desc);
        }

        self.callable.call(args)
    }

    /// Number of calls made through this wrapper since creation or the last reset.
    pub fn count(&self) -> u64 {
        self.state.count()
    }

    /// Reset this wrapper's counter to zero.
    pub fn reset_count(&self) {
        self.state.reset();
    }

    /// Identity of the wrapped callable.
    pub fn id(&self) -> CallableId {
        self.state.id()
    }

    /// Display name of the wrapped callable.
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// Parameter list captured at wrap time.
    pub fn signature(&self) -> &Signature {
        self.state.signature()
    }

    /// The wrapped callable itself.
    pub fn inner(&self) -> &C {
        &self.callable
    }
}

impl<C> fmt::Debug for TrackedCallable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedCallable")
            .field("state", &self.state)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
