//! Presentation of parsed stack frames.

use crate::constants::{DOT, PADDING, SPACE_CHAR};
use crate::stack::{Frame, FrameKind, PathShortener};
use crate::style::{Palette, StyleKind};

/// `path:line - fn` for one frame, with the path transform its kind calls for.
pub fn frame_text(frame: &Frame, paths: &PathShortener) -> String {
    let path = match frame.kind {
        FrameKind::Application => paths.short_path(&frame.path),
        FrameKind::Library => paths.module_path(&frame.path),
        FrameKind::Other => frame.path.clone(),
    };
    format!("{}:{} - {}", path, frame.line, frame.function)
}

/// Styled, bulleted line for one frame.
pub fn present_frame(frame: &Frame, paths: &PathShortener, palette: &Palette) -> String {
    let bullet = format!("{SPACE_CHAR}{DOT}{SPACE_CHAR}");
    format!(
        "{PADDING}{}{}",
        palette.paint(StyleKind::Dim, &bullet),
        palette.paint(StyleKind::for_frame(frame.kind), &frame_text(frame, paths))
    )
}

/// Lines for every frame; no frame is ever skipped.
pub fn present_frames(frames: &[Frame], paths: &PathShortener, palette: &Palette) -> Vec<String> {
    frames
        .iter()
        .map(|frame| present_frame(frame, paths, palette))
        .collect()
}
