// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration merging.
//!
//! Handles merging configurations from different sources with proper precedence.

use tracing::warn;

use super::types::{OutputStyle, ResolvedConfig, SinkKind, TrackerConfig};

/// Environment variable that switches output on or off.
pub const ENV_ENABLED: &str = "CALLTRACK_ENABLED";

/// Environment variable selecting the output style.
pub const ENV_STYLE: &str = "CALLTRACK_STYLE";

/// Environment variable selecting the output sink.
pub const ENV_SINK: &str = "CALLTRACK_SINK";

/// Overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub enabled: Option<bool>,
    pub style: Option<OutputStyle>,
    pub sink: Option<SinkKind>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup(ENV_ENABLED).and_then(|v| match parse_bool(&v) {
            Some(b) => Some(b),
            None => {
                warn!(var = ENV_ENABLED, value = %v, "Ignoring unparseable boolean");
                None
            }
        });

        let style = lookup(ENV_STYLE).and_then(|v| {
            v.parse::<OutputStyle>()
                .map_err(|e| warn!(var = ENV_STYLE, error = %e, "Ignoring override"))
                .ok()
        });

        let sink = lookup(ENV_SINK).and_then(|v| {
            v.parse::<SinkKind>()
                .map_err(|e| warn!(var = ENV_SINK, error = %e, "Ignoring override"))
                .ok()
        });

        Self {
            enabled,
            style,
            sink,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Default configuration values.
pub fn default_config() -> ResolvedConfig {
    ResolvedConfig::default()
}

/// Merge multiple configurations with precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment overrides
/// 2. Workspace config (.calltrack.json)
/// 3. Global config (~/.calltrack/config.json)
/// 4. Default values
pub fn merge_config(
    global: Option<TrackerConfig>,
    workspace: Option<TrackerConfig>,
    env: EnvOverrides,
) -> ResolvedConfig {
    let mut result = default_config();

    if let Some(config) = global {
        apply_tracker_config(&mut result, &config);
    }

    if let Some(config) = workspace {
        apply_tracker_config(&mut result, &config);
    }

    apply_env_overrides(&mut result, &env);

    result
}

fn apply_tracker_config(result: &mut ResolvedConfig, config: &TrackerConfig) {
    if let Some(enabled) = config.enabled {
        result.enabled = enabled;
    }
    if let Some(style) = config.style {
        result.style = style;
    }
    if let Some(sink) = config.sink {
        result.sink = sink;
    }
    if config.max_value_width.is_some() {
        result.max_value_width = config.max_value_width;
    }
}

fn apply_env_overrides(result: &mut ResolvedConfig, env: &EnvOverrides) {
    if let Some(enabled) = env.enabled {
        result.enabled = enabled;
    }
    if let Some(style) = env.style {
        result.style = style;
    }
    if let Some(sink) = env.sink {
        result.sink = sink;
    }
}
