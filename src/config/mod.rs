// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration module for calltrack.
//!
//! Handles loading and merging of output settings from multiple sources:
//! - Global config: ~/.calltrack/config.json
//! - Workspace config: .calltrack.json, .calltrack.yaml, or calltrack.config.json
//! - Environment: CALLTRACK_ENABLED, CALLTRACK_STYLE, CALLTRACK_SINK
//!
//! Configuration is merged with precedence (env > workspace > global > defaults).

mod loader;
mod merger;
mod types;

pub use loader::{
    get_global_config_dir, get_global_config_path, load_config_file, load_global_config,
    load_workspace_config, CONFIG_FILES, GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILE,
};

pub use merger::{default_config, merge_config, EnvOverrides, ENV_ENABLED, ENV_SINK, ENV_STYLE};

pub use types::{OutputStyle, ResolvedConfig, SinkKind, TrackerConfig};

use crate::error::ConfigError;
use std::path::Path;

/// Load and merge all configuration sources for a workspace.
///
/// This is the main entry point for configuration loading.
pub fn load_config(workspace_root: &Path) -> Result<ResolvedConfig, ConfigError> {
    load_config_with_env(workspace_root, EnvOverrides::from_env())
}

/// Like [`load_config`], with explicit environment overrides.
pub fn load_config_with_env(
    workspace_root: &Path,
    env: EnvOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let global = load_global_config()?;
    let workspace = load_workspace_config(workspace_root)?;

    Ok(merge_config(global, workspace, env))
}
