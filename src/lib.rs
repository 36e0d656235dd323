// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! calltrack - count calls and print their arguments.
//!
//! Wrap a callable once and every invocation through the wrapper is
//! counted, described (`greet(): call #1 ( name = Ann, greeting = Hi )`)
//! and forwarded unchanged. A [`CallRegistry`] keeps the counters and
//! answers queries across all wrapped callables.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`signature`] - Parameter descriptors (required vs. defaulted)
//! - [`args`] - Positional and keyword arguments of a call
//! - [`callable`] - The [`Callable`] trait, [`Function`] and [`Opaque`]
//! - [`description`] - Binding arguments to parameters for one call
//! - [`output`] - Pluggable renderers and sinks
//! - [`tracker`] - The counting wrapper
//! - [`registry`] - Counter table and global convenience functions
//! - [`config`] - Output settings from files and environment
//! - [`telemetry`] - `tracing-subscriber` setup
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```rust
//! use calltrack::{signature, CallArgs, CallRegistry, Function, MemorySink, Output, PlainRenderer};
//!
//! let sink = MemorySink::new();
//! let registry = CallRegistry::with_output(Output::new(PlainRenderer::new(), sink.clone()));
//!
//! let greet = registry.wrap(Function::new(
//!     "greet",
//!     signature![name, greeting = "Hi"],
//!     |args: &CallArgs| {
//!         let name = args.get(0).and_then(|v| v.as_str()).unwrap_or("");
//!         let greeting = args.keyword("greeting").and_then(|v| v.as_str()).unwrap_or("Hi");
//!         format!("{}, {}!", greeting, name)
//!     },
//! ))?;
//!
//! assert_eq!(greet.call(&CallArgs::new().arg("Ann")), "Hi, Ann!");
//! assert_eq!(sink.last().unwrap(), "greet(): call #1 ( name = Ann, greeting = Hi )");
//! assert_eq!(registry.count(greet.id())?, 1);
//! # Ok::<(), calltrack::TrackerError>(())
//! ```

pub mod args;
pub mod callable;
pub mod config;
pub mod description;
pub mod error;
pub mod output;
pub mod registry;
pub mod signature;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod tracker;

/// Dynamically typed argument value.
pub use serde_json::Value;

// Re-export commonly used types at crate root
pub use args::CallArgs;
pub use callable::{Callable, CallableId, Function, Opaque};
pub use description::{ArgSource, BoundArg, CallDescription};
pub use error::{ConfigError, Result, SignatureError, TrackerError};
pub use output::{
    CallRenderer, CallSink, ColoredRenderer, MemorySink, NullSink, Output, PlainRenderer,
    StderrSink, StdoutSink, TracingSink,
};
pub use registry::{
    all_counts, all_tracked, count, reset_all_counts, reset_count, track, CallRegistry,
    RegistrySnapshot, TrackedEntry, GLOBAL_REGISTRY,
};
pub use signature::{Param, Signature};
pub use tracker::{TrackedCallable, TrackerState};

/// calltrack version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_root_exports_wrap_and_count() {
        let registry = CallRegistry::with_output(Output::disabled());
        let tracked = registry
            .wrap(Function::new("f", signature![a, b = 2], |args: &CallArgs| {
                args.get(0).cloned()
            }))
            .unwrap();

        assert_eq!(tracked.call(&CallArgs::new().arg(1)), Some(Value::from(1)));
        assert_eq!(registry.count(tracked.id()), Ok(1));
        assert_eq!(registry.all_counts().get("f"), Some(&1));
    }
}
