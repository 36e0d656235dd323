// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Rendering strategies for call descriptions.

use colored::Colorize;

use crate::description::CallDescription;

/// Turns a [`CallDescription`] into the line handed to a sink.
pub trait CallRenderer: Send + Sync {
    fn render(&self, desc: &CallDescription) -> String;
}

/// Plain text: `greet(): call #1 ( name = Ann, greeting = Hi )`.
#[derive(Debug, Clone, Default)]
pub struct PlainRenderer {
    max_value_width: Option<usize>,
}

impl PlainRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate rendered values longer than `width` characters.
    pub fn with_max_value_width(mut self, width: Option<usize>) -> Self {
        self.max_value_width = width;
        self
    }
}

impl CallRenderer for PlainRenderer {
    fn render(&self, desc: &CallDescription) -> String {
        format!(
            "{} {}",
            desc.call_info(),
            desc.arg_segment(self.max_value_width)
        )
    }
}

/// ANSI-styled text: call info in red, arguments in blue.
///
/// Honors the `colored` crate's global switches (`NO_COLOR`,
/// `CLICOLOR_FORCE`, `colored::control::set_override`).
#[derive(Debug, Clone, Default)]
pub struct ColoredRenderer {
    max_value_width: Option<usize>,
}

impl ColoredRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate rendered values longer than `width` characters.
    pub fn with_max_value_width(mut self, width: Option<usize>) -> Self {
        self.max_value_width = width;
        self
    }
}

impl CallRenderer for ColoredRenderer {
    fn render(&self, desc: &CallDescription) -> String {
        format!(
            "{} {}",
            desc.call_info().red(),
            desc.arg_segment(self.max_value_width).blue()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{signature, CallArgs};

    fn greet_desc() -> CallDescription {
        CallDescription::bind(
            "greet",
            2,
            &signature![name, greeting = "Hi"],
            &CallArgs::new().arg("Bo").kwarg("greeting", "Yo"),
        )
    }

    #[test]
    fn test_plain_renderer() {
        let line = PlainRenderer::new().render(&greet_desc());
        insta::assert_snapshot!(line, @"greet(): call #2 ( name = Bo, greeting = Yo )");
    }

    #[test]
    fn test_plain_renderer_truncates() {
        let line = PlainRenderer::new()
            .with_max_value_width(Some(1))
            .render(&greet_desc());
        assert_eq!(line, "greet(): call #2 ( name = B..., greeting = Y... )");
    }

    #[test]
    fn test_colored_renderer_styles_segments() {
        colored::control::set_override(true);
        let line = ColoredRenderer::new().render(&greet_desc());
        colored::control::unset_override();

        assert_eq!(
            line,
            "\u{1b}[31mgreet(): call #2\u{1b}[0m \u{1b}[34m( name = Bo, greeting = Yo )\u{1b}[0m"
        );
    }
}
