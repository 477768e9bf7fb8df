//! Error types shared across the crate.

use std::fmt::{Display, Formatter};

use crate::platform::PlatformError;

/// Shared result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Persistence failure when interacting with `SQLite`.
    Db(String),
    /// Failure reported by a host platform capability.
    Platform(String),
    /// Image decoding, drawing, or encoding failure.
    Render(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// The text cannot be laid out; user-correctable, surfaced verbatim.
    Layout(LayoutError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Db(msg) => write!(f, "db: {msg}"),
            Self::Platform(msg) => write!(f, "platform: {msg}"),
            Self::Render(msg) => write!(f, "render: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        Self::Platform(err.to_string())
    }
}

impl From<LayoutError> for AppError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

/// The body text cannot be fitted onto the sticker canvas.
///
/// The `Display` output is the message shown to the requesting user as-is.
/// This is the only user-facing error the core produces; it is never treated
/// as a system fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    /// The token that defeated the wrapping strategy.
    pub word: String,
}

impl LayoutError {
    /// Build a layout error for the token that could not be placed.
    #[must_use]
    pub fn for_word(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Something went wrong trying to hyphenate your text. Please note that words may \
             not be longer than 100 characters. Also, currently only English is properly \
             supported for hyphenation."
        )
    }
}

impl std::error::Error for LayoutError {}
