//! Stack frame model, the raw stack-text parser seam, and path shortening.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Origin of a stack frame.
pub enum FrameKind {
    /// Code belonging to the project being debugged.
    Application,
    /// Code from an installed dependency.
    Library,
    /// Runtime internals, native code, or anything unclassified.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One parsed stack entry.
pub struct Frame {
    pub path: String,
    pub line: u32,
    /// Function or symbol name; `<anonymous>` when the trace omits it.
    #[serde(rename = "fn")]
    pub function: String,
    pub kind: FrameKind,
}

/// Turns raw stack text into ordered frames.
///
/// Implementations must return an empty vector for empty or unparseable
/// input rather than failing.
pub trait StackParser: Send + Sync {
    fn parse(&self, raw: &str) -> Vec<Frame>;
}

/// [`StackParser`] for V8-style `at fn (path:line:col)` traces.
///
/// Lines that are not frame lines (the error headline, `async` markers,
/// `index N` locations) are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct V8StackParser;

impl StackParser for V8StackParser {
    fn parse(&self, raw: &str) -> Vec<Frame> {
        raw.lines().filter_map(parse_frame_line).collect()
    }
}

fn frame_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\s*at\s+(?:(.+?)\s+\((?:eval at [^()]*\([^()]*\),\s*)?([^()]+?):(\d+)(?::\d+)?\)|([^()]+?):(\d+)(?::\d+)?)\s*$",
        )
        .expect("valid frame regex")
    })
}

fn parse_frame_line(line: &str) -> Option<Frame> {
    let cap = frame_line_regex().captures(line)?;
    let (function, path, line_no) = match (cap.get(2), cap.get(3)) {
        (Some(path), Some(line_no)) => (
            cap.get(1).map(|m| m.as_str()).unwrap_or("<anonymous>"),
            path.as_str(),
            line_no.as_str(),
        ),
        _ => ("<anonymous>", cap.get(4)?.as_str(), cap.get(5)?.as_str()),
    };
    let line = line_no.parse::<u32>().ok()?;

    Some(Frame {
        path: path.to_string(),
        line,
        function: function.to_string(),
        kind: classify_path(path),
    })
}

/// Classifies a frame by where its source file lives.
pub fn classify_path(path: &str) -> FrameKind {
    if path.contains("node_modules") {
        return FrameKind::Library;
    }
    if path.starts_with("node:")
        || path.starts_with("internal/")
        || !(path.contains('/') || path.contains('\\'))
    {
        return FrameKind::Other;
    }
    FrameKind::Application
}

const FILE_URL_PREFIX: &str = "file://";
const MODULES_DIR: &str = "node_modules";

#[derive(Debug, Clone, Default)]
/// Path transforms applied to application and library frames.
pub struct PathShortener {
    project_root: Option<String>,
}

impl PathShortener {
    pub fn new(project_root: Option<&Path>) -> Self {
        Self {
            project_root: project_root.map(|root| {
                let root = root.to_string_lossy();
                root.trim_end_matches(['/', '\\']).to_string()
            }),
        }
    }

    /// Makes an application path relative to the project root.
    ///
    /// Paths outside the root keep their absolute form; a `file://` scheme is
    /// always dropped.
    pub fn short_path(&self, path: &str) -> String {
        let path = path.strip_prefix(FILE_URL_PREFIX).unwrap_or(path);
        let Some(root) = self.project_root.as_deref().filter(|r| !r.is_empty()) else {
            return path.to_string();
        };
        match path.strip_prefix(root) {
            Some(rest) if rest.starts_with(['/', '\\']) => {
                rest.trim_start_matches(['/', '\\']).to_string()
            }
            _ => path.to_string(),
        }
    }

    /// Rewrites a dependency path to `package/file` form, starting after the
    /// innermost `node_modules` directory.
    pub fn module_path(&self, path: &str) -> String {
        let path = path.strip_prefix(FILE_URL_PREFIX).unwrap_or(path);
        match path.rfind(MODULES_DIR) {
            Some(idx) => {
                let rest = &path[idx + MODULES_DIR.len()..];
                match rest.strip_prefix(['/', '\\']) {
                    Some(module) if !module.is_empty() => module.to_string(),
                    _ => path.to_string(),
                }
            }
            None => path.to_string(),
        }
    }
}
