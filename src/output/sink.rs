// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Output sinks for rendered call lines.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::description::CallDescription;

/// Destination for rendered call lines, one line per invocation.
#[cfg_attr(test, mockall::automock)]
pub trait CallSink: Send + Sync {
    fn emit(&self, line: &str, desc: &CallDescription);
}

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl CallSink for StdoutSink {
    fn emit(&self, line: &str, _desc: &CallDescription) {
        println!("{}", line);
    }
}

/// Writes each line to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl CallSink for StderrSink {
    fn emit(&self, line: &str, _desc: &CallDescription) {
        eprintln!("{}", line);
    }
}

/// Target of the events written by [`TracingSink`].
pub const CALLS_TARGET: &str = "calltrack::calls";

/// Emits each call as a structured `tracing` event.
///
/// The event carries `callable`, `call` and `args` fields alongside the
/// rendered line, so log filters can match on the callable name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl CallSink for TracingSink {
    fn emit(&self, line: &str, desc: &CallDescription) {
        info!(
            target: CALLS_TARGET,
            callable = %desc.name(),
            call = desc.call(),
            args = %desc.arg_list(None),
            "{}",
            line
        );
    }
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CallSink for NullSink {
    fn emit(&self, _line: &str, _desc: &CallDescription) {}
}

/// Keeps every line in memory.
///
/// Clones share the same buffer, so a test can hand one clone to a tracker
/// and read the lines back through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent line.
    pub fn last(&self) -> Option<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all captured lines.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl CallSink for MemorySink {
    fn emit(&self, line: &str, _desc: &CallDescription) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
