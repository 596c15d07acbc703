//! Terminal styling for rendered lines.

use ansi_term::{Color, Style};

use crate::stack::FrameKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Fixed set of styles the renderer applies.
pub enum StyleKind {
    /// Bold red, used for the error name heading.
    Heading,
    /// Red, used for field labels and cause reasons.
    Label,
    /// Terminal default color.
    Reset,
    /// Dimmed text for bullets, frame counts and unclassified frames.
    Dim,
    /// Yellow, used for application frames.
    Highlight,
}

impl StyleKind {
    /// Style used to present a frame of the given kind.
    pub fn for_frame(kind: FrameKind) -> Self {
        match kind {
            FrameKind::Application => StyleKind::Highlight,
            FrameKind::Library => StyleKind::Reset,
            FrameKind::Other => StyleKind::Dim,
        }
    }

    fn style(self) -> Style {
        match self {
            StyleKind::Heading => Color::Red.bold(),
            StyleKind::Label => Color::Red.normal(),
            StyleKind::Reset => Style::new(),
            StyleKind::Dim => Style::new().dimmed(),
            StyleKind::Highlight => Color::Yellow.normal(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Maps [`StyleKind`] values to painted text.
///
/// A disabled palette returns text unchanged, which is what `NO_COLOR`
/// terminals and tests want.
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, kind: StyleKind, text: &str) -> String {
        if self.enabled {
            kind.style().paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_leaves_text_untouched() {
        let palette = Palette::plain();
        assert_eq!(palette.paint(StyleKind::Heading, "TypeError"), "TypeError");
        assert_eq!(palette.paint(StyleKind::Dim, " • "), " • ");
    }

    #[test]
    fn enabled_palette_wraps_text_in_escape_codes() {
        let palette = Palette::default();
        let painted = palette.paint(StyleKind::Label, "code: ");
        assert!(painted.starts_with("\u{1b}["));
        assert!(painted.contains("code: "));
        assert!(painted.ends_with("\u{1b}[0m"));
    }

    #[test]
    fn reset_style_adds_no_codes() {
        let palette = Palette::default();
        assert_eq!(palette.paint(StyleKind::Reset, "plain"), "plain");
    }

    #[test]
    fn frame_kind_selects_style() {
        assert_eq!(StyleKind::for_frame(FrameKind::Application), StyleKind::Highlight);
        assert_eq!(StyleKind::for_frame(FrameKind::Library), StyleKind::Reset);
        assert_eq!(StyleKind::for_frame(FrameKind::Other), StyleKind::Dim);
    }
}
