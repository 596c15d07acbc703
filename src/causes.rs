//! Splitting of chained stack traces into a primary stack and its causes.

use crate::constants::CAUSE_DELIMITER;
use crate::stack::{Frame, StackParser};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `Caused by: ` level of a chained stack trace.
pub struct CauseSegment {
    /// First line of the segment, cut at the first `;`.
    pub reason: String,
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Frames of the primary stack followed by one segment per cause.
pub struct StackSections {
    pub primary: Vec<Frame>,
    pub causes: Vec<CauseSegment>,
}

/// Splits `stack` on the cause delimiter and parses every part.
///
/// Segments that parse to zero frames are kept here; the renderer decides
/// not to show them.
pub fn split_stack(stack: &str, parser: &dyn StackParser) -> StackSections {
    let mut parts = stack.split(CAUSE_DELIMITER);
    let primary = parts.next().map(|p| parser.parse(p)).unwrap_or_default();
    let causes = parts
        .map(|segment| CauseSegment {
            reason: reason_of(segment),
            frames: parser.parse(segment),
        })
        .collect();

    StackSections { primary, causes }
}

/// Headline of a cause segment.
///
/// Anything after the first `;` on that line is dropped; upstream loggers
/// append structured metadata there.
pub fn reason_of(segment: &str) -> String {
    let first_line = segment.split('\n').next().unwrap_or_default();
    let headline = first_line.split(';').next().unwrap_or_default();
    headline.replacen(CAUSE_DELIMITER, "", 1)
}
