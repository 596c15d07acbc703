//! Glyphs and limits shared by the rendering stages.

/// Prefix applied to every rendered line.
pub const PADDING: &str = "  ";
pub const SPACE_CHAR: &str = " ";
/// Bullet shown in front of each stack frame.
pub const DOT: &str = "•";
/// Marker in front of the error name heading.
pub const ARROW: &str = "➜";

/// Separator between the primary stack and each cause in raw stack text.
pub const CAUSE_DELIMITER: &str = "Caused by: ";

/// Arrays longer than this are summarized instead of serialized.
pub const MAX_ARRAY_ITEMS: usize = 50;
/// Serialized objects longer than this (in UTF-16 code units) are summarized.
pub const MAX_SERIALIZED_LEN: usize = 2000;
pub const MAX_SERIALIZE_DEPTH: usize = 128;

/// Fields rendered by the header stage or the stack stage, never as custom fields.
pub const KNOWN_FIELDS: [&str; 5] = ["name", "message", "code", "signal", "stack"];
