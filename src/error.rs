// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for calltrack.
//!
//! Tracker operations fail with [`TrackerError`]; configuration loading
//! fails with [`ConfigError`]. Both use `thiserror` for their definitions.

use thiserror::Error;

/// Errors raised by wrapping and registry lookups.
///
/// Errors produced by a wrapped callable are never converted into this
/// type; they reach the caller exactly as the callable returned them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Cannot introspect parameters of {name}: {reason}")]
    Introspection { name: String, reason: String },

    #[error("Callable not tracked: {0}")]
    NotFound(String),
}

impl TrackerError {
    /// Create an introspection error for the named callable.
    pub fn introspection(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Introspection {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Problems found in a declared parameter list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("duplicate parameter name `{0}`")]
    DuplicateParam(String),

    #[error("required parameter `{0}` follows a parameter with a default")]
    RequiredAfterDefault(String),

    #[error("{defaults} default values declared for {params} parameters")]
    TooManyDefaults { defaults: usize, params: usize },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error reading config: {0}")]
    IoError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err.to_string())
    }
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
