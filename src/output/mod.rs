// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Presentation of call descriptions.
//!
//! Output is split into two pluggable parts:
//!
//! - [`CallRenderer`] - turns a description into a line (plain or colored)
//! - [`CallSink`] - where the line goes (stdout, stderr, tracing, memory)
//!
//! [`Output`] bundles one of each plus an on/off switch and is handed to
//! every tracker at wrap time.

mod render;
mod sink;

pub use render::{CallRenderer, ColoredRenderer, PlainRenderer};
pub use sink::{
    CallSink, MemorySink, NullSink, StderrSink, StdoutSink, TracingSink, CALLS_TARGET,
};

#[cfg(test)]
pub use sink::MockCallSink;

use std::fmt;
use std::sync::Arc;

use crate::description::CallDescription;

/// Renderer, sink, and enable switch used by trackers.
#[derive(Clone)]
pub struct Output {
    renderer: Arc<dyn CallRenderer>,
    sink: Arc<dyn CallSink>,
    enabled: bool,
}

impl Output {
    /// Combine a renderer and a sink.
    pub fn new(renderer: impl CallRenderer + 'static, sink: impl CallSink + 'static) -> Self {
        Self {
            renderer: Arc::new(renderer),
            sink: Arc::new(sink),
            enabled: true,
        }
    }

    /// Output that is switched off: calls are counted but nothing is emitted.
    pub fn disabled() -> Self {
        Self::default().with_enabled(false)
    }

    /// Replace the sink, keeping the renderer.
    pub fn with_sink(mut self, sink: impl CallSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Replace the renderer, keeping the sink.
    pub fn with_renderer(mut self, renderer: impl CallRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Switch emission on or off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether descriptions are rendered and emitted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render `desc` and hand the line to the sink.
    pub fn emit(&self, desc: &CallDescription) {
        if !self.enabled {
            return;
        }
        let line = self.renderer.render(desc);
        self.sink.emit(&line, desc);
    }
}

impl Default for Output {
    /// Plain text to standard output.
    fn default() -> Self {
        Self::new(PlainRenderer::new(), StdoutSink)
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{signature, CallArgs};

    fn desc() -> CallDescription {
        CallDescription::bind("f", 1, &signature![a, b = 2], &CallArgs::new().arg(1))
    }

    #[test]
    fn test_emit_renders_into_sink() {
        let sink = MemorySink::new();
        let output = Output::new(PlainRenderer::new(), sink.clone());

        output.emit(&desc());
        assert_eq!(sink.lines(), vec!["f(): call #1 ( a = 1, b = 2 )"]);
    }

    #[test]
    fn test_disabled_output_emits_nothing() {
        let sink = MemorySink::new();
        let output = Output::disabled().with_sink(sink.clone());

        assert!(!output.is_enabled());
        output.emit(&desc());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sink_receives_description() {
        let mut mock = MockCallSink::new();
        mock.expect_emit()
            .withf(|line, desc| line.starts_with("f(): call #1") && desc.args().len() == 2)
            .times(1)
            .return_const(());

        Output::new(PlainRenderer::new(), mock).emit(&desc());
    }
}
