//! Rendering of one error record into styled terminal lines.

use serde_json::Value as JsonValue;
use tracing::trace;

use crate::causes::split_stack;
use crate::config::RenderOptions;
use crate::constants::{ARROW, PADDING, SPACE_CHAR};
use crate::frames::present_frames;
use crate::record::{custom_fields, error_snapshot, header_fields, is_error, stack_text};
use crate::serialize::{field_text, SerializePolicy};
use crate::stack::{PathShortener, StackParser, V8StackParser};
use crate::style::{Palette, StyleKind};

/// One already-styled output line.
pub type RenderedLine = String;

/// Renders error records.
///
/// Holds only immutable configuration, so one renderer can serve many
/// threads at once.
pub struct ErrorRenderer {
    palette: Palette,
    paths: PathShortener,
    parser: Box<dyn StackParser>,
    policy: SerializePolicy,
}

impl ErrorRenderer {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            palette: Palette::new(options.color),
            paths: PathShortener::new(options.project_root.as_deref()),
            parser: Box::new(V8StackParser),
            policy: SerializePolicy::default(),
        }
    }

    /// Replaces the default V8 stack parser.
    pub fn with_parser(mut self, parser: impl StackParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_policy(mut self, policy: SerializePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Renders `record` into padded lines.
    ///
    /// Without `raw`, `record` must wrap its error in an `err` object or
    /// nothing is rendered. With `raw`, `record` is the error object.
    /// The record is never modified.
    pub fn render(&self, record: &JsonValue, raw: bool) -> Vec<RenderedLine> {
        if !raw && !is_error(record) {
            return Vec::new();
        }
        let Some(err) = error_snapshot(record, raw) else {
            return Vec::new();
        };

        let mut output = Vec::new();

        for (key, value) in header_fields(&err) {
            let text = field_text(value, &self.policy);
            if key == "name" {
                let heading = format!("{ARROW}{SPACE_CHAR}{text}");
                output.push(self.palette.paint(StyleKind::Heading, &heading));
            } else {
                output.push(self.field_line(key, &text));
            }
        }

        for (key, value) in custom_fields(&err) {
            let text = field_text(value, &self.policy);
            output.push(self.field_line(key, &text));
        }

        if let Some(stack) = stack_text(&err) {
            self.render_stack(stack, &mut output);
        }

        trace!(lines = output.len(), raw, "rendered error record");
        output
            .into_iter()
            .map(|line| format!("{PADDING}{line}"))
            .collect()
    }

    fn render_stack(&self, stack: &str, output: &mut Vec<RenderedLine>) {
        let sections = split_stack(stack, self.parser.as_ref());

        if !sections.primary.is_empty() {
            let count = format!("[{} Frames]", sections.primary.len());
            output.push(self.label("stack") + &self.palette.paint(StyleKind::Dim, &count));
            output.extend(present_frames(&sections.primary, &self.paths, &self.palette));
        }

        for cause in sections.causes.iter().filter(|c| !c.frames.is_empty()) {
            let count = format!(" [{} Frames]", cause.frames.len());
            output.push(
                self.label("Caused by")
                    + &self.palette.paint(StyleKind::Label, &cause.reason)
                    + &self.palette.paint(StyleKind::Dim, &count),
            );
            output.extend(present_frames(&cause.frames, &self.paths, &self.palette));
        }
    }

    fn label(&self, key: &str) -> String {
        let label = format!("{PADDING}{key}:{SPACE_CHAR}");
        self.palette.paint(StyleKind::Label, &label)
    }

    fn field_line(&self, key: &str, text: &str) -> String {
        self.label(key) + &self.palette.paint(StyleKind::Reset, text)
    }
}

impl Default for ErrorRenderer {
    fn default() -> Self {
        Self::new(&RenderOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::stack::{Frame, FrameKind};

    fn plain() -> ErrorRenderer {
        ErrorRenderer::new(&RenderOptions {
            color: false,
            project_root: None,
        })
    }

    struct FixedParser(usize);

    impl StackParser for FixedParser {
        fn parse(&self, raw: &str) -> Vec<Frame> {
            if raw.trim().is_empty() {
                return Vec::new();
            }
            (0..self.0)
                .map(|i| Frame {
                    path: format!("/lib/f{i}.js"),
                    line: i as u32 + 1,
                    function: "f".to_string(),
                    kind: FrameKind::Other,
                })
                .collect()
        }
    }

    #[test]
    fn header_lines_use_heading_and_labels() {
        let lines = plain().render(
            &json!({"err": {"name": "TypeError", "message": "bad", "code": "E_BAD", "signal": "SIGINT"}}),
            false,
        );
        assert_eq!(
            lines,
            vec![
                "  ➜ TypeError",
                "    message: bad",
                "    code: E_BAD",
                "    signal: SIGINT",
            ]
        );
    }

    #[test]
    fn custom_parser_drives_frame_count() {
        let renderer = plain().with_parser(FixedParser(3));
        let lines = renderer.render(&json!({"stack": "anything"}), true);
        assert_eq!(lines[0], "    stack: [3 Frames]");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "     • /lib/f0.js:1 - f");
    }

    #[test]
    fn policy_override_changes_array_limit() {
        let policy = SerializePolicy {
            max_array_items: 2,
            ..SerializePolicy::default()
        };
        let renderer = plain().with_policy(policy);
        let lines = renderer.render(&json!({"ids": [1, 2, 3]}), true);
        assert_eq!(lines, vec!["    ids: [Array with 3 items]"]);
    }

    #[test]
    fn colored_output_keeps_padding_prefix() {
        let lines = ErrorRenderer::default().render(&json!({"err": {"name": "E", "message": "m"}}), false);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with(PADDING)));
        assert!(lines[0].contains("\u{1b}["));
    }

    #[test]
    fn renderer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ErrorRenderer>();
    }
}
