// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Callables that can be wrapped by a tracker.
//!
//! - [`Callable`] trait: identity, display name, parameter list and the call itself
//! - [`Function`]: a closure paired with a declared [`Signature`]
//! - [`Opaque`]: a closure with no parameter list, which cannot be wrapped

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::args::CallArgs;
use crate::error::TrackerError;
use crate::signature::Signature;

/// Stable identity of a callable, used as the registry key.
///
/// Clones of a [`Function`] share its id, so wrapping a clone counts as
/// wrapping the same callable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CallableId(Uuid);

impl CallableId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Get a short representation (first 8 characters).
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for CallableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CallableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallableId({})", self.short())
    }
}

impl From<Uuid> for CallableId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Anything a tracker can wrap.
///
/// The output type is whatever the callable returns. Fallible callables
/// simply return a `Result`; the tracker forwards it without looking inside.
///
/// # Example
///
/// ```rust
/// use calltrack::{CallArgs, Callable, CallableId, Signature, TrackerError};
///
/// struct Add {
///     id: CallableId,
/// }
///
/// impl Callable for Add {
///     type Output = i64;
///
///     fn id(&self) -> CallableId {
///         self.id
///     }
///
///     fn name(&self) -> &str {
///         "add"
///     }
///
///     fn signature(&self) -> Result<Signature, TrackerError> {
///         Ok(Signature::new().required("a").required("b"))
///     }
///
///     fn call(&self, args: &CallArgs) -> i64 {
///         let a = args.get(0).and_then(|v| v.as_i64()).unwrap_or(0);
///         let b = args.get(1).and_then(|v| v.as_i64()).unwrap_or(0);
///         a + b
///     }
/// }
/// ```
pub trait Callable: Send + Sync {
    /// Value returned by [`Callable::call`].
    type Output;

    /// Identity used to key the registry.
    fn id(&self) -> CallableId;

    /// Display name used in call descriptions and name-keyed reports.
    fn name(&self) -> &str;

    /// Declared parameter list.
    ///
    /// Returns [`TrackerError::Introspection`] when the parameters cannot be
    /// determined; such callables cannot be wrapped.
    fn signature(&self) -> Result<Signature, TrackerError>;

    /// Run the callable.
    fn call(&self, args: &CallArgs) -> Self::Output;
}

/// A closure with a declared parameter list.
///
/// ```rust
/// use calltrack::{signature, CallArgs, Callable, Function};
///
/// let double = Function::new("double", signature![x], |args: &CallArgs| {
///     args.get(0).and_then(|v| v.as_i64()).unwrap_or(0) * 2
/// });
/// assert_eq!(double.call(&CallArgs::new().arg(21)), 42);
/// ```
pub struct Function<F> {
    id: CallableId,
    name: String,
    signature: Signature,
    func: Arc<F>,
}

impl<F> Function<F> {
    /// Pair a closure with its name and parameter list.
    pub fn new(name: impl Into<String>, signature: Signature, func: F) -> Self {
        Self {
            id: CallableId::new(),
            name: name.into(),
            signature,
            func: Arc::new(func),
        }
    }

    /// The declared parameter list, unvalidated.
    pub fn declared_signature(&self) -> &Signature {
        &self.signature
    }
}

impl<F> Clone for Function<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            signature: self.signature.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<F> fmt::Debug for Function<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

impl<F, R> Callable for Function<F>
where
    F: Fn(&CallArgs) -> R + Send + Sync,
{
    type Output = R;

    fn id(&self) -> CallableId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> Result<Signature, TrackerError> {
        self.signature
            .validate()
            .map_err(|e| TrackerError::introspection(&self.name, e.to_string()))?;
        Ok(self.signature.clone())
    }

    fn call(&self, args: &CallArgs) -> R {
        (self.func)(args)
    }
}

/// A closure whose parameter list is not known.
///
/// Stands in for foreign or native functions: it can be called directly,
/// but wrapping it fails with [`TrackerError::Introspection`].
pub struct Opaque<F> {
    id: CallableId,
    name: String,
    func: Arc<F>,
}

impl<F> Opaque<F> {
    /// Wrap a closure without declaring its parameters.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            id: CallableId::new(),
            name: name.into(),
            func: Arc::new(func),
        }
    }
}

impl<F> Clone for Opaque<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<F, R> Callable for Opaque<F>
where
    F: Fn(&CallArgs) -> R + Send + Sync,
{
    type Output = R;

    fn id(&self) -> CallableId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> Result<Signature, TrackerError> {
        Err(TrackerError::introspection(
            &self.name,
            "no parameter list available",
        ))
    }

    fn call(&self, args: &CallArgs) -> R {
        (self.func)(args)
    }
}
