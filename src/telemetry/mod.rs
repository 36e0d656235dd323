// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logging setup for programs that use calltrack.
//!
//! calltrack logs through `tracing`: registry bookkeeping at `debug`,
//! per-call events at `trace`, and, with the tracing sink selected, one
//! `info` event per tracked call under the `calltrack::calls` target.
//! Nothing is printed until a subscriber is installed; this module provides
//! a ready-made one.
//!
//! # Usage
//!
//! ```rust,ignore
//! use calltrack::telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(&TelemetryConfig::default())?;
//! ```

mod init;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard, CALLS_TARGET, CRATE_TARGET};
