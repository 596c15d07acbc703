//! Error definitions for the rendering pipeline and its command-line driver.

use thiserror::Error;

#[derive(Debug, Error)]
/// Top-level error type used inside the crate and by the CLI.
///
/// Rendering itself never surfaces these: the field serializer converts
/// them into placeholder text before they reach the output.
pub enum RenderError {
    /// A custom field value could not be turned into text.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// A custom field nests deeper than the serializer is willing to walk.
    #[error("serialization error: nesting exceeds {0} levels")]
    DepthExceeded(usize),
    /// Invalid render option (for example an empty project root).
    #[error("config error: {0}")]
    ConfigError(String),
    /// Input document could not be read as a JSON record.
    #[error("input error: {0}")]
    InputError(String),
    /// Filesystem I/O error from the CLI.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
