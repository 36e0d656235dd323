// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Parameter descriptors for tracked callables.
//!
//! A [`Signature`] is the ordered list of parameters a callable declares.
//! Parameters without a default are *required* and bind to positional
//! arguments by index; parameters with a default are *optional* and bind to
//! keyword arguments, falling back to the declared default. Defaults may
//! only appear on a trailing suffix of the list.
//!
//! The descriptor list is computed once, when the callable is wrapped, and
//! reused for every invocation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SignatureError;
use crate::Value;

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name as rendered in call descriptions.
    pub name: String,

    /// Declared default value, if the parameter is optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Param {
    /// A parameter with no default.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter with a declared default.
    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    /// Whether the parameter declares a default value.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered parameter list of a callable.
///
/// # Example
///
/// ```rust
/// use calltrack::Signature;
///
/// let sig = Signature::new().required("name").optional("greeting", "Hi");
/// assert_eq!(sig.num_required(), 1);
/// assert_eq!(sig.optional_params()[0].name, "greeting");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Create an empty signature (a callable taking no parameters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param::required(name));
        self
    }

    /// Append a parameter with a default value.
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push(Param::optional(name, default));
        self
    }

    /// Append a parameter, optional when `default` is `Some`.
    pub fn param(mut self, name: impl Into<String>, default: Option<Value>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default,
        });
        self
    }

    /// Build a signature from parameter names and the defaults of their
    /// trailing suffix.
    ///
    /// When `defaults` is `None` the default list is unknown and every
    /// parameter is treated as required.
    pub fn from_parts<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        defaults: Option<Vec<Value>>,
    ) -> Result<Self, SignatureError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let defaults = defaults.unwrap_or_default();

        if defaults.len() > names.len() {
            return Err(SignatureError::TooManyDefaults {
                defaults: defaults.len(),
                params: names.len(),
            });
        }

        let num_required = names.len() - defaults.len();
        let mut defaults = defaults.into_iter();
        let params = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Param {
                name,
                default: if i < num_required { None } else { defaults.next() },
            })
            .collect();

        Ok(Self { params })
    }

    /// Check that names are unique and defaults form a trailing suffix.
    pub fn validate(&self) -> Result<(), SignatureError> {
        let mut seen = HashSet::new();
        let mut saw_default = false;

        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParam(param.name.clone()));
            }
            if param.has_default() {
                saw_default = true;
            } else if saw_default {
                return Err(SignatureError::RequiredAfterDefault(param.name.clone()));
            }
        }

        Ok(())
    }

    /// All parameters in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Total number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the callable declares no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of parameters that declare a default.
    pub fn num_defaults(&self) -> usize {
        self.params.iter().filter(|p| p.has_default()).count()
    }

    /// Number of parameters bound positionally: total minus defaults.
    pub fn num_required(&self) -> usize {
        self.params.len() - self.num_defaults()
    }

    /// The leading parameters without defaults.
    pub fn required_params(&self) -> &[Param] {
        &self.params[..self.num_required()]
    }

    /// The trailing parameters with defaults.
    pub fn optional_params(&self) -> &[Param] {
        &self.params[self.num_required()..]
    }
}

/// Build a [`Signature`] from a parameter list.
///
/// Parameters with `= value` become optional with that default; values go
/// through `Value::from`.
///
/// ```rust
/// use calltrack::signature;
///
/// let sig = signature![name, greeting = "Hi"];
/// assert_eq!(sig.len(), 2);
/// assert_eq!(sig.num_required(), 1);
/// ```
#[macro_export]
macro_rules! signature {
    (@default) => {
        ::std::option::Option::None
    };
    (@default $default:expr) => {
        ::std::option::Option::Some($crate::Value::from($default))
    };
    () => {
        $crate::Signature::new()
    };
    ($($name:ident $(= $default:expr)?),+ $(,)?) => {
        $crate::Signature::new()
            $( .param(stringify!($name), $crate::signature!(@default $($default)?)) )+
    };
}
