// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-invocation call descriptions.
//!
//! A [`CallDescription`] pairs every declared parameter with the value it
//! received: required parameters take positional arguments by index,
//! optional parameters take the keyword value when one was passed and their
//! declared default otherwise. Binding never fails; a required parameter
//! with nothing to bind renders as `<missing>`.

use std::fmt;

use serde::Serialize;

use crate::args::CallArgs;
use crate::signature::Signature;
use crate::Value;

/// Placeholder rendered for a required parameter that received no value.
pub const MISSING_VALUE: &str = "<missing>";

/// Where a bound value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgSource {
    Positional,
    Keyword,
    Default,
    Missing,
}

/// One parameter paired with its value for a single call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundArg {
    pub name: String,
    pub value: Option<Value>,
    pub source: ArgSource,
}

impl BoundArg {
    /// Render the value, truncated to `max_width` characters when given.
    pub fn render_value(&self, max_width: Option<usize>) -> String {
        match &self.value {
            Some(value) => truncate(render_value(value), max_width),
            None => MISSING_VALUE.to_string(),
        }
    }
}

/// Resolved description of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallDescription {
    name: String,
    call: u64,
    args: Vec<BoundArg>,
}

impl CallDescription {
    /// Bind `args` against `signature` for call number `call` of `name`.
    pub fn bind(name: impl Into<String>, call: u64, signature: &Signature, args: &CallArgs) -> Self {
        let mut bound = Vec::with_capacity(signature.len());

        for (i, param) in signature.required_params().iter().enumerate() {
            let (value, source) = match (args.get(i), args.keyword(&param.name)) {
                (Some(v), _) => (Some(v.clone()), ArgSource::Positional),
                (None, Some(v)) => (Some(v.clone()), ArgSource::Keyword),
                (None, None) => (None, ArgSource::Missing),
            };
            bound.push(BoundArg {
                name: param.name.clone(),
                value,
                source,
            });
        }

        for param in signature.optional_params() {
            let (value, source) = match args.keyword(&param.name) {
                Some(v) => (Some(v.clone()), ArgSource::Keyword),
                None => (param.default.clone(), ArgSource::Default),
            };
            bound.push(BoundArg {
                name: param.name.clone(),
                value,
                source,
            });
        }

        Self {
            name: name.into(),
            call,
            args: bound,
        }
    }

    /// Name of the invoked callable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordinal of this call, starting at 1.
    pub fn call(&self) -> u64 {
        self.call
    }

    /// Bound arguments in declaration order.
    pub fn args(&self) -> &[BoundArg] {
        &self.args
    }

    /// The `name(): call #n` segment.
    pub fn call_info(&self) -> String {
        format!("{}(): call #{}", self.name, self.call)
    }

    /// Comma-separated `name = value` pairs.
    pub fn arg_list(&self, max_width: Option<usize>) -> String {
        self.args
            .iter()
            .map(|arg| format!("{} = {}", arg.name, arg.render_value(max_width)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The parenthesized argument segment, `( a = 1, b = 2 )`.
    pub fn arg_segment(&self, max_width: Option<usize>) -> String {
        if self.args.is_empty() {
            "( )".to_string()
        } else {
            format!("( {} )", self.arg_list(max_width))
        }
    }
}

impl fmt::Display for CallDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.call_info(), self.arg_segment(None))
    }
}

/// Human-readable form of an argument value: strings unquoted, everything
/// else in its JSON form.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(text: String, max_width: Option<usize>) -> String {
    match max_width {
        Some(max) if text.chars().count() > max => {
            let kept: String = text.chars().take(max).collect();
            format!("{}...", kept)
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature;
    use serde_json::json;

    #[test]
    fn test_positional_binding_in_declaration_order() {
        let sig = signature![x, y, z];
        let desc = CallDescription::bind("f", 1, &sig, &CallArgs::positional([1, 2, 3]));

        assert_eq!(desc.arg_list(None), "x = 1, y = 2, z = 3");
        assert!(desc.args().iter().all(|a| a.source == ArgSource::Positional));
    }

    #[test]
    fn test_default_used_when_keyword_omitted() {
        let sig = signature![a, b = 2];

        let desc = CallDescription::bind("f", 1, &sig, &CallArgs::new().arg(1));
        assert_eq!(desc.arg_list(None), "a = 1, b = 2");
        assert_eq!(desc.args()[1].source, ArgSource::Default);

        let desc = CallDescription::bind("f", 2, &sig, &CallArgs::new().arg(1).kwarg("b", 5));
        assert_eq!(desc.arg_list(None), "a = 1, b = 5");
        assert_eq!(desc.args()[1].source, ArgSource::Keyword);
    }

    #[test]
    fn test_optional_passed_positionally_still_shows_default() {
        // Optional parameters bind from keywords only.
        let sig = signature![a, b = 2];
        let desc = CallDescription::bind("f", 1, &sig, &CallArgs::positional([1, 9]));
        assert_eq!(desc.arg_list(None), "a = 1, b = 2");
    }

    #[test]
    fn test_missing_required() {
        let sig = signature![a, b];
        let desc = CallDescription::bind("f", 1, &sig, &CallArgs::new().arg(1));
        assert_eq!(desc.arg_list(None), "a = 1, b = <missing>");
        assert_eq!(desc.args()[1].source, ArgSource::Missing);
    }

    #[test]
    fn test_required_passed_by_keyword() {
        let sig = signature![a, b];
        let desc = CallDescription::bind("f", 1, &sig, &CallArgs::new().arg(1).kwarg("b", "x"));
        assert_eq!(desc.arg_list(None), "a = 1, b = x");
        assert_eq!(desc.args()[1].source, ArgSource::Keyword);
    }

    #[test]
    fn test_display() {
        let sig = signature![name, greeting = "Hi"];
        let desc = CallDescription::bind("greet", 1, &sig, &CallArgs::new().arg("Ann"));
        assert_eq!(desc.to_string(), "greet(): call #1 ( name = Ann, greeting = Hi )");

        let desc = CallDescription::bind("noop", 3, &signature![], &CallArgs::new());
        assert_eq!(desc.to_string(), "noop(): call #3 ( )");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("Ann")), "Ann");
        assert_eq!(render_value(&json!(1.5)), "1.5");
        assert_eq!(render_value(&json!(null)), "null");
        assert_eq!(render_value(&json!([1, "a"])), r#"[1,"a"]"#);
        assert_eq!(render_value(&json!({"k": true})), r#"{"k":true}"#);
    }

    #[test]
    fn test_truncation() {
        let sig = signature![text];
        let desc = CallDescription::bind("f", 1, &sig, &CallArgs::new().arg("abcdefgh"));
        assert_eq!(desc.arg_list(Some(3)), "text = abc...");
        assert_eq!(desc.arg_list(Some(8)), "text = abcdefgh");
    }
}
