// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Subscriber setup for calltrack's log targets.

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use crate::output::CALLS_TARGET;

/// Target prefix of calltrack's own bookkeeping (registration, resets, config).
pub const CRATE_TARGET: &str = "calltrack";

/// Which events reach the terminal, and how they look.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level for everything outside calltrack.
    pub default_level: Level,

    /// Level for tracked-call events under [`CALLS_TARGET`]; `None` hides them.
    pub calls_level: Option<Level>,

    /// Level for registry and config bookkeeping under [`CRATE_TARGET`].
    pub bookkeeping_level: Level,

    /// Print the event target (`calltrack::calls`, `calltrack::registry`, ...).
    pub include_target: bool,

    pub ansi_colors: bool,

    /// One line per event.
    pub compact: bool,

    /// Raw `EnvFilter` directive; replaces the levels above when set.
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::calls()
    }
}

impl TelemetryConfig {
    /// Tracked calls at `info`, calltrack bookkeeping at `warn`.
    pub fn calls() -> Self {
        Self {
            default_level: Level::INFO,
            calls_level: Some(Level::INFO),
            bookkeeping_level: Level::WARN,
            include_target: false,
            ansi_colors: true,
            compact: true,
            filter_directive: None,
        }
    }

    /// Tracked calls at `info`, registrations and resets at `debug`.
    pub fn verbose() -> Self {
        Self {
            default_level: Level::INFO,
            calls_level: Some(Level::INFO),
            bookkeeping_level: Level::DEBUG,
            include_target: true,
            ansi_colors: true,
            compact: false,
            filter_directive: None,
        }
    }

    /// Warnings only; tracked-call events are hidden.
    pub fn quiet() -> Self {
        Self {
            default_level: Level::WARN,
            calls_level: None,
            bookkeeping_level: Level::WARN,
            include_target: false,
            ansi_colors: false,
            compact: true,
            filter_directive: None,
        }
    }

    /// Everything calltrack emits, without colors.
    pub fn testing() -> Self {
        Self {
            default_level: Level::WARN,
            calls_level: Some(Level::TRACE),
            bookkeeping_level: Level::TRACE,
            include_target: true,
            ansi_colors: false,
            compact: false,
            filter_directive: None,
        }
    }

    /// Set the level for non-calltrack targets.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Set the level of tracked-call events, or hide them with `None`.
    pub fn with_calls_level(mut self, level: Option<Level>) -> Self {
        self.calls_level = level;
        self
    }

    /// Set the level of calltrack bookkeeping.
    pub fn with_bookkeeping_level(mut self, level: Level) -> Self {
        self.bookkeeping_level = level;
        self
    }

    /// Set a custom filter directive.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter_directive = Some(filter.into());
        self
    }

    /// Enable or disable ANSI colors.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi_colors = ansi;
        self
    }

    /// The `EnvFilter` directive these settings describe.
    ///
    /// The calls directive comes last so it overrides the crate-wide one.
    pub fn directives(&self) -> String {
        if let Some(directive) = &self.filter_directive {
            return directive.clone();
        }

        let calls = match self.calls_level {
            Some(level) => level.as_str().to_lowercase(),
            None => "off".to_string(),
        };
        format!(
            "{},{}={},{}={}",
            self.default_level.as_str().to_lowercase(),
            CRATE_TARGET,
            self.bookkeeping_level.as_str().to_lowercase(),
            CALLS_TARGET,
            calls
        )
    }

    fn env_filter(&self) -> EnvFilter {
        if self.filter_directive.is_none() {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return filter;
            }
        }
        let directives = self.directives();
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(Self::calls().directives()))
    }
}

/// Returned by [`init_telemetry`]; keep it alive for the duration of your program.
#[derive(Debug)]
pub struct TelemetryGuard {
    _private: (),
}

/// Install a global subscriber for calltrack's targets.
///
/// `RUST_LOG` takes precedence unless [`TelemetryConfig::filter_directive`]
/// is set. Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,ignore
/// use calltrack::telemetry::{init_telemetry, TelemetryConfig};
///
/// let _guard = init_telemetry(&TelemetryConfig::verbose())?;
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> io::Result<TelemetryGuard> {
    let fmt_layer = fmt::layer()
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target);

    let registry = tracing_subscriber::registry().with(config.env_filter());
    let installed = if config.compact {
        registry.with(fmt_layer.compact()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };
    installed.map_err(|e| io::Error::other(e.to_string()))?;

    Ok(TelemetryGuard { _private: () })
}
