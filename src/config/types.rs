// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.
//!
//! Defines the structure of file-level and resolved configuration,
//! supporting JSON and YAML formats.

use std::io::IsTerminal;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::output::{
    ColoredRenderer, NullSink, Output, PlainRenderer, StderrSink, StdoutSink, TracingSink,
};

/// Tracker configuration as written in a config file.
/// Can be defined in .calltrack.json or .calltrack.yaml in the project root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Whether call descriptions are emitted at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// How call lines are styled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<OutputStyle>,

    /// Where call lines are written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sink: Option<SinkKind>,

    /// Truncate rendered argument values longer than this many characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value_width: Option<usize>,
}

/// Styling of rendered call lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// No ANSI escapes
    #[default]
    Plain,
    /// Red call info, blue arguments
    Colored,
    /// Colored when the sink's stream is a terminal
    Auto,
}

impl OutputStyle {
    /// Whether lines written to `sink` get ANSI colors.
    ///
    /// `Auto` checks the stream the sink writes to. The tracing sink is
    /// never colored.
    pub fn use_color(self, sink: SinkKind) -> bool {
        match (self, sink) {
            (_, SinkKind::Tracing) | (Self::Plain, _) => false,
            (Self::Colored, _) => true,
            (Self::Auto, SinkKind::Stdout) => std::io::stdout().is_terminal(),
            (Self::Auto, SinkKind::Stderr) => std::io::stderr().is_terminal(),
            (Self::Auto, SinkKind::Null) => false,
        }
    }
}

impl FromStr for OutputStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "colored" | "color" => Ok(Self::Colored),
            "auto" => Ok(Self::Auto),
            other => Err(ConfigError::InvalidValue {
                field: "style".to_string(),
                message: format!("unknown style '{}'", other),
            }),
        }
    }
}

/// Destination of rendered call lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    Stderr,
    /// Structured `tracing` events
    Tracing,
    /// Discard output
    Null,
}

impl FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stdout" => Ok(Self::Stdout),
            "stderr" => Ok(Self::Stderr),
            "tracing" | "log" => Ok(Self::Tracing),
            "null" | "none" => Ok(Self::Null),
            other => Err(ConfigError::InvalidValue {
                field: "sink".to_string(),
                message: format!("unknown sink '{}'", other),
            }),
        }
    }
}

/// Fully resolved configuration with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub enabled: bool,
    pub style: OutputStyle,
    pub sink: SinkKind,
    pub max_value_width: Option<usize>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            style: OutputStyle::Plain,
            sink: SinkKind::Stdout,
            max_value_width: None,
        }
    }
}

impl ResolvedConfig {
    /// Build the renderer/sink pair described by this configuration.
    ///
    /// The tracing sink always gets plain text.
    pub fn build_output(&self) -> Output {
        let colored = self.style.use_color(self.sink);

        let output = match self.sink {
            SinkKind::Stdout => Output::default().with_sink(StdoutSink),
            SinkKind::Stderr => Output::default().with_sink(StderrSink),
            SinkKind::Tracing => Output::default().with_sink(TracingSink),
            SinkKind::Null => Output::default().with_sink(NullSink),
        };

        let output = if colored {
            output.with_renderer(ColoredRenderer::new().with_max_value_width(self.max_value_width))
        } else {
            output.with_renderer(PlainRenderer::new().with_max_value_width(self.max_value_width))
        };

        output.with_enabled(self.enabled)
    }
}
